//! Pin listing

use padmux_core::board::BoardDatabase;
use padmux_core::PinAttachment;

/// List all pins and their SERCOM attachments in search order
pub fn list_pins(db: &BoardDatabase) {
    println!("SERCOM pins on {} ({} instances):", db.chip(), db.instance_count());
    println!();
    println!("{:<6} {:<22} {:<22}", "Pin", "Attachment 0", "Attachment 1");
    println!("{}", "-".repeat(52));

    for pin in db.pins() {
        println!(
            "{:<6} {:<22} {:<22}",
            pin.id.to_string(),
            format_attachment(&pin.attachments[0]),
            format_attachment(&pin.attachments[1])
        );
    }
}

fn format_attachment(attachment: &PinAttachment) -> String {
    match attachment.instance {
        Some(instance) => format!(
            "{}/PAD{} ({})",
            instance,
            attachment.pad.index(),
            attachment.pinmux
        ),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padmux_core::board::samd21;

    #[test]
    fn test_format_attachment() {
        let pa17 = samd21::PINS
            .iter()
            .find(|p| p.id.to_string() == "PA17")
            .unwrap();
        assert_eq!(
            format_attachment(&pa17.attachments[1]),
            "SERCOM3/PAD1 (0x00110003)"
        );
        assert_eq!(format_attachment(&PinAttachment::NONE), "-");
    }
}
