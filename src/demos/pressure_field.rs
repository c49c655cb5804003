//! Pressure of two randomly placed point sources in water, one image per
//! frame over a fraction of a cycle.

use super::Result;
use crate::render::{ImageFigure, Panel};
use crate::settings::DemoSettings;
use spectra_core::{point_source_field, FieldParams};

/// Only the seed applies; the acoustic constants are fixed.
pub fn run(settings: &DemoSettings) -> Result<Vec<Panel>> {
    let params = FieldParams {
        seed: settings.seed,
        ..Default::default()
    };
    let field = point_source_field(&params)?;
    for (i, s) in field.sources.iter().enumerate() {
        log::debug!("source {i}: ({:.3}, {:.3}) m, Q = {:.4} m³/s", s.x, s.y, s.strength);
    }

    let count = field.frames.len();
    Ok(field
        .frames
        .into_iter()
        .zip(field.times)
        .enumerate()
        .map(|(i, (frame, t))| {
            Panel::Image(ImageFigure::new(
                format!("Pressure field {}/{count} (t = {:.3} ms)", i + 1, t * 1e3),
                frame,
            ))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_panel_per_frame() {
        let panels = run(&DemoSettings {
            seed: Some(4),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(panels.len(), 30);
        assert_eq!(panels[0].title(), "Pressure field 1/30 (t = 0.000 ms)");
        match &panels[29] {
            Panel::Image(f) => assert_eq!((f.image.width(), f.image.height()), (256, 256)),
            Panel::Plot(_) => panic!("expected an image"),
        }
    }

    #[test]
    fn test_seed_fixes_the_frames() {
        let settings = DemoSettings {
            seed: Some(9),
            ..Default::default()
        };
        assert_eq!(run(&settings).unwrap(), run(&settings).unwrap());
    }
}
