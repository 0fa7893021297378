//! Viewer page: a full-screen HTML document showing the latest capture.

use std::path::PathBuf;

use crate::context::ServiceContext;
use crate::error::ResolveError;
use crate::resolver::{self, Resolution};

const STYLE: &str = "\
        body {
            background-color: black;
            margin: 0;
            padding: 0;
            overflow: hidden;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
            width: 100vw;
        }
        img {
            max-width: 100%;
            max-height: 100%;
            height: auto;
            width: auto;
            object-fit: contain;
        }
";

/// Renders the viewer page for the latest capture under a root.
#[derive(Debug, Clone)]
pub struct ViewerPage {
    root: PathBuf,
    refresh_secs: u64,
}

impl ViewerPage {
    /// Creates a viewer over `root` that asks the browser to reload every
    /// `refresh_secs` seconds.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, refresh_secs: u64) -> Self {
        Self { root: root.into(), refresh_secs }
    }

    /// Resolves the latest capture and renders the page.
    ///
    /// The image `src` is the capture's relative path plus a `?t=<unix secs>`
    /// token so browsers never show a cached frame. Without a capture the
    /// page is rendered with no image.
    ///
    /// # Errors
    ///
    /// Returns an error if listing the capture tree fails.
    pub fn render(&self, ctx: &ServiceContext) -> Result<String, ResolveError> {
        let resolution = resolver::resolve(ctx.fs.as_ref(), &self.root)?;
        let src = match resolution {
            Resolution::Found(artifact) => {
                Some(format!("{}?t={}", artifact.relative_path, ctx.clock.now().timestamp()))
            }
            Resolution::NotFound => None,
        };
        Ok(render_document(src.as_deref(), self.refresh_secs))
    }
}

/// Renders the page shell, embedding `image_src` when given.
#[must_use]
pub fn render_document(image_src: Option<&str>, refresh_secs: u64) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str("    <title>Latest Capture</title>\n");
    html.push_str(&format!("    <meta http-equiv=\"refresh\" content=\"{refresh_secs}\">\n"));
    html.push_str("    <style>\n");
    html.push_str(STYLE);
    html.push_str("    </style>\n</head>\n<body>\n");
    if let Some(src) = image_src {
        html.push_str(&format!("    <img src=\"{}\" alt=\"Latest capture\">\n", escape_attr(src)));
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::adapters::live::{LiveFileSystem, LiveHttpClient};
    use crate::ports::Clock;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn ctx_at(secs: i64) -> ServiceContext {
        ServiceContext {
            clock: Box::new(FixedClock(Utc.timestamp_opt(secs, 0).unwrap())),
            fs: Box::new(LiveFileSystem),
            http: Box::new(LiveHttpClient::new()),
        }
    }

    #[test]
    fn page_embeds_cache_busted_image() {
        let dir = tempfile::tempdir().unwrap();
        let day = dir.path().join("20240102");
        std::fs::create_dir_all(&day).unwrap();
        std::fs::write(day.join("1700000100.jpg"), b"jpeg").unwrap();

        let html = ViewerPage::new(dir.path(), 900).render(&ctx_at(1_700_000_999)).unwrap();

        let expected_src = format!("{}/20240102/1700000100.jpg?t=1700000999", dir.path().display());
        assert!(html.contains(&format!("<img src=\"{expected_src}\"")));
        assert!(html.contains("<meta http-equiv=\"refresh\" content=\"900\">"));
    }

    #[test]
    fn page_without_capture_has_no_image() {
        let html = ViewerPage::new("/nonexistent/latest-capture", 60).render(&ctx_at(1)).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("<img"));
        assert!(html.contains("content=\"60\""));
    }

    #[test]
    fn document_lines_are_newline_terminated() {
        let html = render_document(Some("himawari/20240102/a.jpg?t=1"), 900);
        assert!(html.contains("content=\"900\">\n    <style>"));
        assert!(html.contains("alt=\"Latest capture\">\n</body>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let html = render_document(Some("./a\"b<c>&d.jpg?t=1"), 900);
        assert!(html.contains("src=\"./a&quot;b&lt;c&gt;&amp;d.jpg?t=1\""));
    }
}
