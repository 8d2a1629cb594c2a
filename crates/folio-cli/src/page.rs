//! HTML rendering of the portfolio page.
//!
//! The page is one self-contained document: inline stylesheet, the current
//! snapshot rendered server side, and a small script that types the
//! headline, counts up the stats and polls `/api/metrics` every refresh.

use folio_core::{DashboardSnapshot, MetricGroup, MetricRow, Status};
use folio_yaml::{FolioConfig, Project, SiteManifest, Skill};

/// Timings handed to the page script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageOptions {
    pub(crate) refresh_ms: u64,
    pub(crate) typewriter_ms: u64,
    pub(crate) counter_ms: u64,
}

impl From<&FolioConfig> for PageOptions {
    fn from(config: &FolioConfig) -> Self {
        Self {
            refresh_ms: config.refresh_ms,
            typewriter_ms: config.animation.typewriter_ms,
            counter_ms: config.animation.counter_ms,
        }
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self::from(&FolioConfig::default())
    }
}

const STATUSES: [Status; 4] = [Status::Good, Status::Warning, Status::Error, Status::Info];

const BASE_STYLE: &str = r##"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: system-ui, sans-serif; background: #0b0f19; color: #e6e6e6; line-height: 1.6; }
a { color: #00d4ff; text-decoration: none; }
section { max-width: 1100px; margin: 0 auto; padding: 4rem 1.5rem; }
h2 { font-size: 2rem; margin-bottom: 2rem; }
nav { display: flex; justify-content: space-between; align-items: center; padding: 1rem 1.5rem; border-bottom: 1px solid #1e2433; }
.logo { font-weight: 700; font-size: 1.4rem; color: #00d4ff; }
.live { color: #00ff88; font-size: 0.9rem; }
.hero { display: flex; gap: 2rem; align-items: center; }
.hero img { width: 180px; height: 180px; border-radius: 50%; object-fit: cover; }
#headline { font-size: 2.4rem; min-height: 3.2rem; }
#headline:not(.done)::after { content: "\258C"; color: #00d4ff; }
.about { color: #9aa4b2; margin: 1rem 0; }
.button { display: inline-block; padding: 0.6rem 1.2rem; border: 1px solid #00d4ff; border-radius: 6px; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1.5rem; }
.skill, .card, .project { background: #121826; border: 1px solid #1e2433; border-radius: 10px; padding: 1.5rem; }
.skill.featured { grid-column: span 2; }
.tags { display: flex; flex-wrap: wrap; gap: 0.4rem; margin-top: 0.8rem; }
.tag { font-size: 0.8rem; padding: 0.1rem 0.6rem; border-radius: 999px; background: #1e2433; }
.card h3 { margin-bottom: 1rem; }
.row { display: flex; justify-content: space-between; margin-top: 0.6rem; }
.label { color: #9aa4b2; }
.value { font-weight: 700; font-family: ui-monospace, monospace; }
.bar { height: 6px; background: #1e2433; border-radius: 3px; overflow: hidden; }
.fill { height: 100%; transition: width 0.6s ease; }
#tick { color: #5a6478; font-family: ui-monospace, monospace; }
.stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 1.5rem; text-align: center; }
.stat-number { font-size: 2.4rem; font-weight: 700; color: #00d4ff; }
.badge { font-size: 0.8rem; color: #ffaa00; }
.links { display: flex; gap: 1rem; margin-top: 1rem; }
footer { text-align: center; color: #5a6478; padding: 2rem; }
"##;

const SCRIPT: &str = r##"
(function () {
  const cfg = window.FOLIO;

  const headline = document.getElementById('headline');
  const chars = Array.from(headline.dataset.text);
  let shown = 0;
  const type = () => {
    headline.textContent = chars.slice(0, shown).join('');
    if (shown < chars.length) {
      shown += 1;
      setTimeout(type, cfg.typewriterMs);
    } else {
      headline.classList.add('done');
    }
  };
  type();

  const counters = document.querySelectorAll('.stat-number');
  const start = performance.now();
  const count = (now) => {
    const progress = Math.min((now - start) / cfg.counterMs, 1);
    counters.forEach((el) => {
      el.textContent = Math.floor(progress * Number(el.dataset.target)) + el.dataset.suffix;
    });
    if (progress < 1) {
      requestAnimationFrame(count);
    }
  };
  requestAnimationFrame(count);

  const apply = (data) => {
    document.getElementById('tick').textContent = 'tick ' + data.tick;
    data.cards.forEach((card) => card.rows.forEach((row) => {
      const value = document.getElementById('m-' + row.key);
      if (value) {
        value.textContent = row.value;
        value.className = 'value status-' + row.status;
      }
      const bar = document.getElementById('bar-' + row.key);
      if (bar && row.fill !== null) {
        bar.style.width = row.fill + '%';
        bar.className = 'fill status-' + row.status;
      }
    }));
  };
  const poll = () => fetch('/api/metrics').then((r) => r.json()).then(apply).catch(() => {});
  setInterval(poll, cfg.refreshMs);
})();
"##;

/// Escape text for HTML element content and double-quoted attributes.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the whole page with `snapshot` as the initial metric values.
pub(crate) fn render_page(
    site: &SiteManifest,
    snapshot: &DashboardSnapshot,
    options: &PageOptions,
) -> String {
    let name = escape(&site.name);
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{name}</title>\n<style>{BASE_STYLE}"));
    html.push_str(&status_style());
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(&format!(
        "<nav><span class=\"logo\">{name}</span><span class=\"live\">&#9679; LIVE <span id=\"tick\">tick {}</span></span></nav>\n",
        snapshot.tick
    ));
    html.push_str(&hero(site));
    html.push_str(&skills(&site.skills));
    html.push_str(&dashboard(snapshot));
    html.push_str(&stats(site));
    html.push_str(&projects(&site.projects));
    html.push_str(&contact(site));
    html.push_str(&format!("<footer>&copy; {name}</footer>\n"));

    html.push_str(&format!(
        "<script>window.FOLIO = {{ refreshMs: {}, typewriterMs: {}, counterMs: {} }};</script>\n",
        options.refresh_ms, options.typewriter_ms, options.counter_ms
    ));
    html.push_str(&format!("<script>{SCRIPT}</script>\n</body>\n</html>\n"));
    html
}

/// One class per status label, coloured by the shared palette.
fn status_style() -> String {
    STATUSES
        .iter()
        .map(|s| {
            let color = s.color();
            format!(
                ".value.status-{0} {{ color: {color}; }}\n.fill.status-{0} {{ background: {color}; }}\n",
                s.as_str()
            )
        })
        .collect()
}

fn hero(site: &SiteManifest) -> String {
    let mut html = String::from("<section class=\"hero\" id=\"home\">\n");
    if let Some(photo) = &site.photo_url {
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            escape(photo),
            escape(&site.name)
        ));
    }
    html.push_str("<div>\n");
    html.push_str(&format!(
        "<h1 id=\"headline\" data-text=\"{}\"></h1>\n",
        escape(&site.headline)
    ));
    if !site.about.is_empty() {
        html.push_str(&format!("<p class=\"about\">{}</p>\n", escape(&site.about)));
    }
    if let Some(resume) = &site.resume_url {
        html.push_str(&format!(
            "<a class=\"button\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Download Resume</a>\n",
            escape(resume)
        ));
    }
    html.push_str("</div>\n</section>\n");
    html
}

fn tags(tech: &[String]) -> String {
    if tech.is_empty() {
        return String::new();
    }
    let items: String = tech
        .iter()
        .map(|t| format!("<span class=\"tag\">{}</span>", escape(t)))
        .collect();
    format!("<div class=\"tags\">{items}</div>")
}

fn skills(skills: &[Skill]) -> String {
    let mut html = String::from("<section id=\"skills\">\n<h2>Skills</h2>\n<div class=\"grid\">\n");
    for skill in skills {
        let class = if skill.featured { "skill featured" } else { "skill" };
        html.push_str(&format!(
            "<div class=\"{class}\"><h3>{}</h3><p>{}</p>{}</div>\n",
            escape(&skill.title),
            escape(&skill.description),
            tags(&skill.tech)
        ));
    }
    html.push_str("</div>\n</section>\n");
    html
}

fn metric_row(row: &MetricRow) -> String {
    let status = row.status.as_str();
    let mut html = format!(
        "<div class=\"row\"><span class=\"label\">{}</span><span id=\"m-{}\" class=\"value status-{status}\">{}</span></div>\n",
        escape(row.label),
        row.key,
        escape(&row.value)
    );
    if let Some(fill) = row.fill {
        html.push_str(&format!(
            "<div class=\"bar\"><div id=\"bar-{}\" class=\"fill status-{status}\" style=\"width: {fill:.1}%\"></div></div>\n",
            row.key
        ));
    }
    html
}

fn dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut html =
        String::from("<section id=\"dashboard\">\n<h2>Live Metrics</h2>\n<div class=\"grid\">\n");
    for group in MetricGroup::all() {
        html.push_str(&format!(
            "<div class=\"card\" data-group=\"{}\" style=\"border-top: 3px solid {}\">\n<h3>{}</h3>\n",
            group.key(),
            group.accent(),
            escape(group.title())
        ));
        for row in snapshot.rows(group) {
            html.push_str(&metric_row(&row));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</section>\n");
    html
}

fn stats(site: &SiteManifest) -> String {
    if site.stats.is_empty() {
        return String::new();
    }
    let mut html = String::from("<section id=\"stats\">\n<h2>By the Numbers</h2>\n<div class=\"stats\">\n");
    for stat in &site.stats {
        let suffix = escape(&stat.suffix);
        html.push_str(&format!(
            "<div><div class=\"stat-number\" data-target=\"{n}\" data-suffix=\"{suffix}\">0{suffix}</div><div class=\"label\">{}</div></div>\n",
            escape(&stat.label),
            n = stat.number
        ));
    }
    html.push_str("</div>\n</section>\n");
    html
}

fn external_link(href: &str, text: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{text}</a>",
        escape(href)
    )
}

fn projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return String::new();
    }
    let mut html = String::from("<section id=\"projects\">\n<h2>Projects</h2>\n<div class=\"grid\">\n");
    for project in projects {
        html.push_str("<div class=\"project\">");
        if let Some(badge) = &project.badge {
            html.push_str(&format!("<span class=\"badge\">{}</span>", escape(badge)));
        }
        html.push_str(&format!(
            "<h3>{}</h3><p>{}</p>{}",
            escape(&project.title),
            escape(&project.description),
            tags(&project.tech)
        ));
        let links: Vec<String> = [
            project.repository.as_deref().map(|u| external_link(u, "Code")),
            project.live.as_deref().map(|u| external_link(u, "Live")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !links.is_empty() {
            html.push_str(&format!("<div class=\"links\">{}</div>", links.concat()));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</section>\n");
    html
}

fn contact(site: &SiteManifest) -> String {
    let contact = &site.contact;
    let mut html = String::from("<section id=\"contact\">\n<h2>Get In Touch</h2>\n");
    if !contact.message.is_empty() {
        html.push_str(&format!("<p class=\"about\">{}</p>\n", escape(&contact.message)));
    }
    let mut links = Vec::new();
    if let (Some(mailto), Some(email)) = (contact.mailto(), contact.email.as_deref()) {
        links.push(format!("<a href=\"{}\">{}</a>", escape(&mailto), escape(email)));
    }
    if let Some(github) = &contact.github {
        links.push(external_link(github, "GitHub"));
    }
    if let Some(linkedin) = &contact.linkedin {
        links.push(external_link(linkedin, "LinkedIn"));
    }
    if !links.is_empty() {
        html.push_str(&format!("<div class=\"links\">{}</div>\n", links.concat()));
    }
    html.push_str("</section>\n");
    html
}
