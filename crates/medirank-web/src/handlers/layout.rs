//! Page shell shared by the HTML handlers.

pub use medirank_report::chart::escape_xml as escape_html;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f7fa; color: #1d2330; }
header { background: #1e64dc; color: #fff; padding: 14px 28px; }
header a { color: #fff; text-decoration: none; font-weight: 700; font-size: 1.2rem; }
main { max-width: 1100px; margin: 0 auto; padding: 24px; }
.card { background: #fff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,.12); padding: 20px; margin-bottom: 20px; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 14px; }
label { display: block; font-weight: 600; margin-bottom: 4px; }
input, select { width: 100%; padding: 7px; box-sizing: border-box; }
button { background: #1e64dc; color: #fff; border: 0; border-radius: 6px; padding: 10px 22px; font-size: 1rem; cursor: pointer; }
.alert { background: #fde8e8; border: 1px solid #e0a0a0; color: #8a1c1c; padding: 12px 16px; border-radius: 6px; margin-bottom: 20px; }
.top { border-left: 6px solid #2e8b57; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #e3e6ec; }
.charts svg { max-width: 100%; height: auto; }
"#;

/// Wrap `body` in the common document shell.
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{} | MediRank</title>
    <style>{}</style>
</head>
<body>
<header><a href="/">MediRank Diagnosis Calculator</a></header>
<main>
{}
</main>
</body>
</html>"#,
        escape_html(title),
        STYLE,
        body
    )
}
