use crate::symbology::ColorScale;

/// Renders the map legend for the active variable.
///
/// One swatch row per band of `scale`, lowest band first, titled with the
/// uppercased variable and `unit`. The result replaces the previous legend.
pub fn render_legend(variable: &str, unit: &str, scale: &ColorScale) -> String {
    let mut html = format!(
        "<b>{} ({})</b><br>",
        escape_html(&variable.to_uppercase()),
        escape_html(unit)
    );
    for band in scale.bands() {
        html.push_str(&format!(
            "<i style=\"background:{}\"></i> {}<br>",
            band.color.css(),
            escape_html(&band.label())
        ));
    }
    html
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::render_legend;
    use crate::symbology::ColorScale;

    #[test]
    fn title_and_one_row_per_band() {
        let scale = ColorScale::precipitation();
        let html = render_legend("pr", "mm", &scale);
        assert!(html.starts_with("<b>PR (mm)</b><br>"));
        assert_eq!(html.matches("<i style=").count(), scale.band_count());
    }

    #[test]
    fn rows_use_their_own_band_color() {
        let html = render_legend("et", "mm", &ColorScale::precipitation());
        assert!(html.contains("<i style=\"background:#990808\"></i> &lt;100<br>"));
        assert!(html.contains("<i style=\"background:#5FEB9C\"></i> 900-1000<br>"));
        assert!(html.ends_with("<i style=\"background:#3B0066\"></i> &gt; 1900<br>"));
    }

    #[test]
    fn rerender_for_new_variable_is_a_full_replacement() {
        let scale = ColorScale::precipitation();
        let a = render_legend("pr", "mm", &scale);
        let b = render_legend("rh", "mm", &scale);
        assert!(b.starts_with("<b>RH (mm)</b>"));
        assert_eq!(a.len(), b.len());
    }
}
