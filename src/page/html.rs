use std::fmt::{self, Write};

use super::{Block, Page};

const STYLE: &str = r#"
        body { font-family: "Source Sans Pro", Helvetica, Arial, sans-serif; color: #31333f; margin: 0; }
        .container { max-width: 730px; margin: 0 auto; padding: 3rem 1rem; }
        h2 { border-bottom: 2px solid #1c83e1; padding-bottom: 0.3rem; }
        figure { margin: 1rem 0; text-align: center; }
        figure img { max-width: 100%; }
        figcaption { color: #808495; font-size: 0.875rem; }
        label { display: block; margin: 1rem 0 0.3rem; font-size: 0.875rem; }
        select { width: 100%; padding: 0.5rem; font-size: 1rem; }
        hr { border: none; border-top: 1px solid #e6e6e6; margin: 2rem 0; }
        .error { background: #ffe9e9; color: #7d353b; padding: 1rem; border-radius: 0.5rem; }
"#;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the page as a standalone HTML document. The selectors sit in a
/// GET form that resubmits on change, so every interaction is a fresh render.
pub fn to_html(page: &Page) -> String {
    let mut html = String::new();
    // Writing into a String cannot fail.
    let _ = write_document(&mut html, page);
    html
}

fn write_document(html: &mut String, page: &Page) -> fmt::Result {
    write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>{}</style>
</head>
<body>
<div class="container">
"#,
        escape(&page.title),
        STYLE
    )?;

    let mut in_form = false;
    for block in &page.blocks {
        let is_select = matches!(block, Block::Select { .. });
        if is_select && !in_form {
            writeln!(html, "<form method=\"get\" action=\"/\">")?;
            in_form = true;
        } else if !is_select && in_form {
            writeln!(html, "</form>")?;
            in_form = false;
        }
        write_block(html, block)?;
    }
    if in_form {
        writeln!(html, "</form>")?;
    }

    writeln!(html, "</div>\n</body>\n</html>")
}

fn write_block(html: &mut String, block: &Block) -> fmt::Result {
    match block {
        Block::Title(text) => writeln!(html, "<h1>{}</h1>", escape(text)),
        Block::Header(text) => writeln!(html, "<h2>{}</h2>", escape(text)),
        Block::Subheader(text) => writeln!(html, "<h3>{}</h3>", escape(text)),
        Block::Text(text) => writeln!(html, "<p>{}</p>", escape(text)),
        Block::Strong(text) => writeln!(html, "<p><strong>{}</strong></p>", escape(text)),
        Block::Select {
            name,
            label,
            options,
            selected,
        } => {
            writeln!(html, "<label for=\"{0}\">{1}</label>", name, escape(label))?;
            writeln!(
                html,
                "<select id=\"{0}\" name=\"{0}\" onchange=\"this.form.submit()\">",
                name
            )?;
            for option in options {
                let marker = if option == selected { " selected" } else { "" };
                writeln!(
                    html,
                    "    <option value=\"{0}\"{1}>{0}</option>",
                    escape(option),
                    marker
                )?;
            }
            writeln!(html, "</select>")
        }
        Block::Image { image, caption } => writeln!(
            html,
            "<figure><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>",
            image.to_data_uri(),
            escape(caption),
            escape(caption)
        ),
        Block::Divider => writeln!(html, "<hr>"),
        Block::Error(text) => writeln!(html, "<div class=\"error\">{}</div>", escape(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::EncodedImage;

    fn page(blocks: Vec<Block>) -> Page {
        Page {
            title: "CIRFA demo".to_string(),
            blocks,
            failure: None,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("[2] - Barents <Sea> & \"co\""), "[2] - Barents &lt;Sea&gt; &amp; &quot;co&quot;");
    }

    #[test]
    fn test_selectors_share_one_form() {
        let html = to_html(&page(vec![
            Block::Title("Near-real time automated sea ice mapping".to_string()),
            Block::Select {
                name: "area",
                label: "Select area of interest",
                options: vec!["-".to_string(), "[2] - Barents Sea".to_string()],
                selected: "[2] - Barents Sea".to_string(),
            },
            Block::Select {
                name: "day",
                label: "Select day",
                options: vec!["-".to_string(), "01/01/2024".to_string()],
                selected: "-".to_string(),
            },
            Block::Divider,
        ]));

        assert_eq!(html.matches("<form").count(), 1);
        assert_eq!(html.matches("</form>").count(), 1);
        assert!(html.contains("<option value=\"[2] - Barents Sea\" selected>"));
        assert!(html.contains("<option value=\"-\" selected>"));
        assert!(html.find("</form>").unwrap() < html.find("<hr>").unwrap());
    }

    #[test]
    fn test_image_is_inlined_with_caption() {
        let html = to_html(&page(vec![Block::Image {
            image: EncodedImage {
                mime: "image/png",
                bytes: vec![1, 2, 3],
            },
            caption: "Classification result for S1A_X".to_string(),
        }]));

        assert!(html.contains("src=\"data:image/png;base64,AQID\""));
        assert!(html.contains("<figcaption>Classification result for S1A_X</figcaption>"));
    }

    #[test]
    fn test_document_is_complete() {
        let html = to_html(&page(vec![Block::Header("Results".to_string())]));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>CIRFA demo</title>"));
        assert!(html.contains("<h2>Results</h2>"));
        assert!(!html.contains("<form"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_error_block_is_escaped() {
        let html = to_html(&page(vec![Block::Error("Failed to read <x>".to_string())]));
        assert!(html.contains("<div class=\"error\">Failed to read &lt;x&gt;</div>"));
    }
}
