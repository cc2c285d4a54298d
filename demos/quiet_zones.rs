use std::error::Error;

use qrgen::{ECLevel, QRBuilder};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    for qz in [0, 1, 2, 4, 8] {
        let qr = QRBuilder::new(b"Quiet zones").ec_level(ECLevel::L).quiet_zone(qz).build()?;

        let path = format!("quiet_zone_{qz}.png");
        let renderer = qr.render();
        renderer.save(&path)?;

        let side = renderer.side()?;
        println!("Quiet zone {qz}: {side}x{side} px saved to {path}");
    }

    // Same symbol without any border, sized to fit 200 pixels
    let qr = QRBuilder::new(b"Quiet zones").ec_level(ECLevel::L).build()?;
    let png = qr.render().border(false).fit_width(200).to_png()?;
    std::fs::write("quiet_zone_none.png", png)?;
    println!("Borderless QR code saved to: quiet_zone_none.png");

    Ok(())
}
