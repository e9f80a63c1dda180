//! Windows ascent/descent reconciliation.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use font_container::{FontInstance, rewrite_font};
use log::info;
use read_fonts::TableProvider;
use write_fonts::{from_obj::ToOwnedTable, tables::os2::Os2};

/// Windows clipping metrics after reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinMetrics {
    pub ascent: u16,
    pub descent: u16,
}

/// Raise `usWinAscent`/`usWinDescent` to cover the head bounding box.
/// Values are never decreased.
fn reconcile(os2: &mut Os2, y_min: i16, y_max: i16) -> WinMetrics {
    let ascent = y_max.max(0) as u16;
    let descent = y_min.unsigned_abs();
    if os2.us_win_ascent < ascent {
        os2.us_win_ascent = ascent;
    }
    if os2.us_win_descent < descent {
        os2.us_win_descent = descent;
    }
    WinMetrics { ascent: os2.us_win_ascent, descent: os2.us_win_descent }
}

/// Reconcile the in-memory font against its current head bounds.
///
/// Returns `None` when the font has no OS/2 table.
pub fn reconcile_win_metrics(font: &mut FontInstance) -> Option<WinMetrics> {
    let (y_min, y_max) = (font.head.y_min, font.head.y_max);
    let os2 = font.os2.as_mut()?;
    Some(reconcile(os2, y_min, y_max))
}

/// Reconcile a font file in place, rewriting only its OS/2 table.
///
/// Used after hinting so the hinted outlines and instructions are kept as
/// the hinter wrote them.
pub fn reconcile_win_metrics_in_file(path: &Path) -> Result<Option<WinMetrics>> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let mut result = None;
    let output = rewrite_font(&data, |font, builder| {
        let head = font.head()?;
        let Ok(os2) = font.os2() else {
            return Ok(());
        };
        let mut new_os2: Os2 = os2.to_owned_table();
        result = Some(reconcile(&mut new_os2, head.y_min(), head.y_max()));
        builder.add_table(&new_os2)?;
        Ok(())
    })
    .with_context(|| format!("Failed to update metrics in {}", path.display()))?;

    fs::write(path, output).with_context(|| format!("Failed to write {}", path.display()))?;

    match result {
        Some(m) => info!("Metrics: win ascent {} / descent {}", m.ascent, m.descent),
        None => info!("Metrics: no OS/2 table in {}", path.display()),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use font_container::testing::TestFont;

    use super::*;

    fn font_with(y_min: i16, y_max: i16, ascent: u16, descent: u16) -> FontInstance {
        TestFont::new()
            .rect("a", 0, y_min, 500, y_max, 600)
            .win_metrics(ascent, descent)
            .instance()
    }

    #[test]
    fn test_raises_ascent() {
        let mut font = font_with(-150, 900, 800, 200);
        let metrics = reconcile_win_metrics(&mut font);
        assert_eq!(metrics, Some(WinMetrics { ascent: 900, descent: 200 }));
    }

    #[test]
    fn test_never_decreases() {
        let mut font = font_with(-250, 900, 1100, 300);
        let metrics = reconcile_win_metrics(&mut font);
        assert_eq!(metrics, Some(WinMetrics { ascent: 1100, descent: 300 }));
    }

    #[test]
    fn test_raises_descent() {
        let mut font = font_with(-320, 700, 1000, 200);
        let metrics = reconcile_win_metrics(&mut font).unwrap();
        assert_eq!(metrics.descent, 320);
    }

    #[test]
    fn test_without_os2() {
        let mut font = TestFont::new().rect("a", 0, 0, 500, 900, 600).without_os2().instance();
        assert_eq!(reconcile_win_metrics(&mut font), None);
    }
}
