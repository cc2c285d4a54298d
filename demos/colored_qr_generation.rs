use std::error::Error;

use image::Rgba;
use qrgen::ECLevel;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let background = Rgba([255, 248, 231, 255]);
    let foreground = Rgba([30, 60, 110, 255]);

    // One call: build, size the image to at most 300 pixels and write it
    qrgen::write_color_file(
        b"https://example.org",
        ECLevel::Q,
        300,
        background,
        foreground,
        "colored_qr.png",
    )?;

    println!("Colored QR code saved to: colored_qr.png");
    Ok(())
}
