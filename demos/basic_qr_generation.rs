use std::error::Error;

use qrgen::QRBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Simplest usage - provide only data, all other settings are automatically chosen
    let qr = QRBuilder::new(b"Hello, World!").build()?;

    // Convert to image and save
    let img = qr.to_image(4)?; // 4 pixels per module
    img.save("simple_qr.png")?;

    println!("Simple QR code saved to: simple_qr.png");
    println!("QR metadata: {}", qr.metadata());
    Ok(())
}
