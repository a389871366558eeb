//! Serialise laid-out pages as a standalone HTML document with one A4 sheet per page.

use super::layout::{Align, Element, FontStyle, ImageBox, PAGE_HEIGHT, PAGE_WIDTH, Page, TextBox};
use crate::html::escape;

const STYLE: &str = "\
@page { size: A4; margin: 0; }
body { margin: 0; background: #d9d9d9; font-family: Helvetica, Arial, sans-serif; }
.page { position: relative; margin: 8mm auto; background: #fff; overflow: hidden; break-after: page; }
.page:last-child { break-after: auto; }
.box { position: absolute; box-sizing: border-box; overflow: hidden; white-space: pre; padding: 0 1mm; }
.border { border: 0.2mm solid #000; }
@media print { body { background: none; } .page { margin: 0; } }
";

pub fn render(title: &str, pages: &[Page]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(title)));
    out.push_str(&format!("<style>\n{}</style>\n</head>\n<body>\n", STYLE));

    for page in pages {
        out.push_str(&format!(
            "<section class=\"page\" data-page=\"{}\" style=\"width:{}mm;height:{}mm\">\n",
            page.number, PAGE_WIDTH, PAGE_HEIGHT
        ));
        for element in &page.elements {
            match element {
                Element::Text(text) => out.push_str(&text_box(text)),
                Element::Image(image) => out.push_str(&image_box(image)),
            }
            out.push('\n');
        }
        out.push_str("</section>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn text_box(t: &TextBox) -> String {
    let mut style = format!(
        "left:{:.1}mm;top:{:.1}mm;width:{:.1}mm;height:{:.1}mm;font-size:{}pt;line-height:{:.1}mm;color:{};text-align:{}",
        t.x,
        t.y,
        t.w,
        t.h,
        t.font.size,
        t.line_height,
        t.color.hex(),
        align(t.align),
    );
    match t.font.style {
        FontStyle::Bold => style.push_str(";font-weight:bold"),
        FontStyle::Italic => style.push_str(";font-style:italic"),
        FontStyle::Regular => {}
    }
    if let Some(fill) = t.fill {
        style.push_str(&format!(";background:{}", fill.hex()));
    }

    let class = if t.border { "box border" } else { "box" };
    let body = t
        .lines
        .iter()
        .map(|l| escape(l))
        .collect::<Vec<_>>()
        .join("<br>");
    format!("<div class=\"{}\" style=\"{}\">{}</div>", class, style, body)
}

fn image_box(image: &ImageBox) -> String {
    let src = std::fs::canonicalize(&image.path).unwrap_or_else(|_| image.path.clone());
    format!(
        "<img class=\"box\" alt=\"logo\" src=\"file://{}\" style=\"left:{:.1}mm;top:{:.1}mm;width:{:.1}mm;padding:0\">",
        escape(&src.to_string_lossy()),
        image.x,
        image.y,
        image.w,
    )
}

fn align(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
    }
}
