use super::RenderTarget;
use super::html::{Element, Node};

const HEAD_RESET: &str = "body { margin: 0; padding: 0; min-width: 100%; } \
table { border-collapse: collapse; border-spacing: 0; } \
img { border: 0; height: auto; line-height: 100%; outline: none; text-decoration: none; -ms-interpolation-mode: bicubic; }";

const OFFICE_SETTINGS: &str = "<!--[if mso]><noscript><xml><o:OfficeDocumentSettings>\
<o:PixelsPerInch>96</o:PixelsPerInch></o:OfficeDocumentSettings></xml></noscript><![endif]-->";

/// Fixed-width table that only Outlook's Word engine sees.
fn mso_open(width: u32) -> String {
    format!(
        "<!--[if mso]><table align=\"center\" border=\"0\" cellspacing=\"0\" cellpadding=\"0\" \
         width=\"{width}\"><tr><td align=\"center\" valign=\"top\" width=\"{width}\"><![endif]-->"
    )
}

const MSO_CLOSE: &str = "<!--[if mso]></td></tr></table><![endif]-->";

pub(crate) fn layout_table() -> Element {
    Element::new("table")
        .attr("border", "0")
        .attr("cellpadding", "0")
        .attr("cellspacing", "0")
        .attr("role", "presentation")
}

/// Wraps one block fragment in a centered row capped at the target width.
pub(crate) fn row(fragment: Element, target: &RenderTarget) -> Element {
    let content = Element::new("td")
        .attr("align", "left")
        .attr("bgcolor", target.content_background_color.as_str())
        .style("background-color", &target.content_background_color)
        .style("padding", &target.content_padding)
        .child(fragment);
    let inner = layout_table()
        .attr("width", "100%")
        .style("max-width", format!("{}px", target.width))
        .child(Element::new("tr").child(content));
    Element::new("tr").child(
        Element::new("td")
            .attr("align", "center")
            .style("padding", "0")
            .child(inner),
    )
}

/// Assembles the full document. The Outlook fallback table and the modern
/// max-width table are both sized from `target.width`.
pub(crate) fn document<I>(rows: I, target: &RenderTarget) -> String
where
    I: IntoIterator<Item = Element>,
{
    let content = layout_table()
        .attr("width", "100%")
        .style("max-width", format!("{}px", target.width))
        .style("margin", "0 auto")
        .style("border-radius", &target.border_radius)
        .style("overflow", "hidden")
        .children(rows);

    let mut cell = Element::new("td")
        .attr("align", "center")
        .style("padding", "20px 0")
        .child(Node::Raw(mso_open(target.width)))
        .child(content)
        .child(Node::Raw(MSO_CLOSE.to_string()));

    if let Some(branding) = target.branding.as_deref().filter(|b| !b.trim().is_empty()) {
        let footer = layout_table()
            .attr("width", "100%")
            .style("max-width", format!("{}px", target.width))
            .style("margin", "0 auto")
            .child(
                Element::new("tr").child(
                    Element::new("td")
                        .attr("align", "center")
                        .style("padding", "20px")
                        .style("font-family", &target.font_family)
                        .style("color", "#888888")
                        .style("font-size", "12px")
                        .child(Element::new("p").style("margin", "0").text(branding)),
                ),
            );
        cell = cell.child(footer);
    }

    let body = Element::new("body")
        .style("margin", "0")
        .style("padding", "0")
        .style("background-color", &target.background_color)
        .style("word-spacing", "normal")
        .style("text-size-adjust", "100%")
        .child(
            Element::new("div")
                .style("background-color", &target.background_color)
                .child(
                    layout_table()
                        .attr("width", "100%")
                        .child(Element::new("tr").child(cell)),
                ),
        );

    let head = Element::new("head")
        .child(Element::void("meta").attr("charset", "utf-8"))
        .child(
            Element::void("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1.0"),
        )
        .child(
            Element::void("meta")
                .attr("http-equiv", "X-UA-Compatible")
                .attr("content", "IE=edge"),
        )
        .child(Element::new("title").text(target.title.as_str()))
        .raw(OFFICE_SETTINGS)
        .child(Element::new("style").raw(HEAD_RESET));

    let html = Element::new("html")
        .attr("lang", "en")
        .attr("xmlns", "http://www.w3.org/1999/xhtml")
        .attr("xmlns:v", "urn:schemas-microsoft-com:vml")
        .attr("xmlns:o", "urn:schemas-microsoft-com:office:office")
        .child(head)
        .child(body);

    format!("<!DOCTYPE html>\n{}\n", html.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mso_and_modern_widths_agree() {
        let target = RenderTarget {
            width: 480,
            ..Default::default()
        };
        let html = document(Vec::new(), &target);
        assert!(html.contains("width=\"480\"><tr><td align=\"center\" valign=\"top\" width=\"480\">"));
        assert!(html.contains("max-width: 480px;"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn branding_can_be_disabled() {
        let target = RenderTarget {
            branding: None,
            ..Default::default()
        };
        assert!(!document(Vec::new(), &target).contains("Sent with Portyo"));
        assert!(document(Vec::new(), &RenderTarget::default()).contains("Sent with Portyo"));
    }
}
