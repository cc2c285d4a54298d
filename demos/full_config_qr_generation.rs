use std::error::Error;

use qrgen::{ECLevel, MaskPattern, QRBuilder, Version};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let data = "This example shows all available configuration options for QR code generation.";

    let qr = QRBuilder::new(data.as_bytes())
        .version(Version::new(9)?)    // QR version (size) - if not provided, finds smallest version to fit data
        .ec_level(ECLevel::H)         // Error correction level - if not provided, defaults to ECLevel::M
        .mask(MaskPattern::new(2)?)   // Mask pattern - if not provided, finds best mask based on penalty score
        .quiet_zone(2)                // Quiet zone in modules - if not provided, defaults to 4
        .build()?;

    // Render with 6 pixels per module and save
    qr.render().module_size(6).save("configured_qr.png")?;

    println!("Configured QR code saved to: configured_qr.png");
    println!("QR metadata: {}", qr.metadata());

    Ok(())
}
