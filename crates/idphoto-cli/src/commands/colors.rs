use anyhow::Result;
use console::Style;
use idphoto_core::compose::PRESET_COLORS;

pub fn run() -> Result<()> {
    let name = Style::new().bold();
    let hex = Style::new().dim();
    for preset in PRESET_COLORS {
        println!(
            "  {:<14}{}",
            name.apply_to(preset.name),
            hex.apply_to(preset.color)
        );
    }
    Ok(())
}
