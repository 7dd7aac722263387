use crate::config::Config;
use crate::stats::{Tallies, ranked};
use crate::timezone::TimezoneConverter;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// The full-listing bar scales so the busiest participant gets this width.
const BAR_MAX_PX: u32 = 300;

const PAGE_STYLE: &str = r#":root {
  --bg-color: #111;
  --text-color: #eee;
  --heading-color: #fff;
  --link-color: #7af;
  --border-color: #333;
  --nav-bg: #222;
  --nav-hover: #333;
  --table-border: #333;
  --network-color: #888;
  --bar-color: #4caf50;
}
body.light-theme {
  --bg-color: #f5f5f5;
  --text-color: #333;
  --heading-color: #000;
  --link-color: #0066cc;
  --border-color: #ddd;
  --nav-bg: #e0e0e0;
  --nav-hover: #d0d0d0;
  --table-border: #ddd;
  --network-color: #666;
  --bar-color: #4caf50;
}
body {
  font-family: sans-serif;
  background: var(--bg-color);
  color: var(--text-color);
  margin: 0;
  padding: 20px;
  transition: background 0.3s ease, color 0.3s ease;
}
a {
  color: var(--link-color);
  text-decoration: none;
  transition: color 0.2s;
}
a:hover { text-decoration: underline; }
h1, h2 { color: var(--heading-color); transition: color 0.3s ease; }
table { border-collapse: collapse; margin-top: 1em; }
th, td {
  padding: 6px 12px;
  border-bottom: 1px solid var(--table-border);
  transition: border-color 0.3s ease;
}
.bar { background: var(--bar-color); height: 14px; }
header {
  display: flex;
  justify-content: space-between;
  align-items: center;
  border-bottom: 2px solid var(--border-color);
  padding-bottom: 15px;
  margin-bottom: 20px;
  transition: border-color 0.3s ease;
}
.channel-info { flex: 1; }
.channel-info h1 { margin: 0; font-size: 2em; color: var(--bar-color); }
.channel-info .network {
  color: var(--network-color);
  font-size: 0.9em;
  margin-top: 5px;
  transition: color 0.3s ease;
}
nav { display: flex; gap: 15px; align-items: center; }
nav a, #theme-toggle {
  padding: 8px 15px;
  background: var(--nav-bg);
  border-radius: 4px;
  transition: background 0.2s;
  border: none;
  cursor: pointer;
  color: var(--text-color);
  font-size: 1em;
  font-family: sans-serif;
}
nav a:hover, #theme-toggle:hover { background: var(--nav-hover); text-decoration: none; }
#theme-toggle { display: flex; align-items: center; gap: 5px; }"#;

const THEME_SCRIPT: &str = r#"const themeToggle = document.getElementById('theme-toggle');
const themeIcon = document.getElementById('theme-icon');
const body = document.body;

const savedTheme = localStorage.getItem('theme');
if (savedTheme === 'light') {
  body.classList.add('light-theme');
  themeIcon.textContent = '🌙';
}

themeToggle.addEventListener('click', () => {
  body.classList.toggle('light-theme');

  if (body.classList.contains('light-theme')) {
    themeIcon.textContent = '🌙';
    localStorage.setItem('theme', 'light');
  } else {
    themeIcon.textContent = '☀️';
    localStorage.setItem('theme', 'dark');
  }
});"#;

/// Render the three report pages into `config.output_dir`, overwriting any
/// previous run.
pub fn render_all(config: &Config, tz: &TimezoneConverter, tallies: &Tallies) -> Result<()> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let updated = tz.now_local().format("%Y-%m-%d %H:%M:%S").to_string();
    let pages = [
        ("index.html", format!("Top {}", config.top_n), top_body(config, tallies)),
        ("daily.html", "Per day".to_string(), daily_body(config, tallies)),
        ("total.html", "Total".to_string(), total_body(tallies)),
    ];

    for (name, title, body) in pages {
        let path = config.output_dir.join(name);
        write_page(&path, &title, &body, config, &updated)?;
        debug!("wrote {}", path.display());
    }
    Ok(())
}

fn top_body(config: &Config, tallies: &Tallies) -> String {
    let mut body = format!(
        "<h1>Top {} (all days)</h1>\n<table>\n<tr><th>Nick</th><th>Words</th></tr>\n",
        config.top_n
    );
    for (nick, count) in ranked(tallies.total()).into_iter().take(config.top_n) {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(nick),
            count
        ));
    }
    body.push_str("</table>\n");
    body
}

fn daily_body(config: &Config, tallies: &Tallies) -> String {
    let mut body = String::from("<h1>Statistics per day</h1>\n");
    for (date, day) in tallies.days_newest_first() {
        body.push_str(&format!(
            "<h2>{date}</h2>\n<table>\n<tr><th>Nick</th><th>Words</th></tr>\n"
        ));
        for (nick, count) in ranked(day).into_iter().take(config.top_n) {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape_html(nick),
                count
            ));
        }
        body.push_str("</table>\n");
    }
    body
}

fn total_body(tallies: &Tallies) -> String {
    let rows = ranked(tallies.total());
    let max_count = rows.first().map_or(1, |(_, c)| (*c).max(1));
    let grand_total: u64 = rows.iter().map(|(_, c)| c).sum();

    let mut body = String::from(
        "<h1>Total statistics</h1>\n<table>\n<tr><th>Nick</th><th>Words</th><th>%</th><th></th></tr>\n",
    );
    for (nick, count) in rows {
        let width = (count as f64 / max_count as f64 * f64::from(BAR_MAX_PX)) as u32;
        let percentage = if grand_total > 0 {
            count as f64 / grand_total as f64 * 100.0
        } else {
            0.0
        };
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.1}%</td>\
             <td><div class='bar' style='width:{}px'></div></td></tr>\n",
            escape_html(nick),
            count,
            percentage,
            width
        ));
    }
    body.push_str("</table>\n");
    body
}

fn write_page(
    path: &Path,
    title: &str,
    body: &str,
    config: &Config,
    updated: &str,
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    writeln!(w, "<!DOCTYPE html>")?;
    writeln!(w, "<html lang=\"en\">")?;
    writeln!(w, "<head>")?;
    writeln!(w, "<meta charset=\"utf-8\">")?;
    writeln!(w, "<title>{}</title>", escape_html(title))?;
    writeln!(w, "<style>\n{PAGE_STYLE}\n</style>")?;
    writeln!(w, "</head>")?;
    writeln!(w, "<body>")?;
    writeln!(w)?;
    writeln!(w, "<header>")?;
    writeln!(w, "  <div class=\"channel-info\">")?;
    writeln!(w, "    <h1>{} stats</h1>", escape_html(&config.channel))?;
    writeln!(
        w,
        "    <div class=\"network\">{}</div>",
        escape_html(&config.network)
    )?;
    writeln!(w, "  </div>")?;
    writeln!(w, "  <nav>")?;
    writeln!(w, "    <a href=\"index.html\">Top {}</a>", config.top_n)?;
    writeln!(w, "    <a href=\"daily.html\">Per day</a>")?;
    writeln!(w, "    <a href=\"total.html\">Total</a>")?;
    writeln!(w, "    <button id=\"theme-toggle\" title=\"Switch theme\">")?;
    writeln!(w, "      <span id=\"theme-icon\">☀️</span>")?;
    writeln!(w, "    </button>")?;
    writeln!(w, "  </nav>")?;
    writeln!(w, "</header>")?;
    writeln!(w)?;
    writeln!(w, "{body}")?;
    writeln!(w, "<p><small>Updated {updated}</small></p>")?;
    writeln!(w)?;
    writeln!(w, "<script>\n{THEME_SCRIPT}\n</script>")?;
    writeln!(w, "</body>")?;
    writeln!(w, "</html>")?;
    w.flush()?;
    Ok(())
}

fn escape_html(text: &str) -> String {
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
