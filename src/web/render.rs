use std::fmt::Write;

use crate::models::{Comparison, MatchRecord, PlayerRecord, PlayerStatus, WinStatus};

/// Values shown in the submission form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub player1_id: String,
    pub player2_id: String,
    pub count_matches: u32,
}

impl FormValues {
    pub fn empty(count_matches: u32) -> Self {
        Self {
            player1_id: String::new(),
            player2_id: String::new(),
            count_matches,
        }
    }

    pub fn from_comparison(comparison: &Comparison) -> Self {
        Self {
            player1_id: comparison.players[0].account_id.to_string(),
            player2_id: comparison.players[1].account_id.to_string(),
            count_matches: comparison.limit,
        }
    }
}

const STYLE: &str = "body{font-family:sans-serif;margin:2em;background:#1b1e23;color:#ddd}\
form{margin-bottom:2em}input{margin-right:1em}\
.panels{display:flex;gap:2em}.panel{flex:1}\
table{border-collapse:collapse;width:100%}td,th{padding:4px 8px;border-bottom:1px solid #333;text-align:left}\
.won{color:#6c6}.lost{color:#d55}.notice{color:#e90}.avatar{width:64px;height:64px}\
.hero-icon{width:24px;height:24px;vertical-align:middle;margin-right:4px}";

/// Render the whole page: the form and, when present, both player panels
pub fn render_page(form: &FormValues, comparison: Option<&Comparison>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Dota 2 player comparison</title>\n");
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n<h1>Dota 2 player comparison</h1>\n");

    render_form(&mut html, form);

    if let Some(comparison) = comparison {
        html.push_str("<div class=\"panels\">\n");
        for player in &comparison.players {
            render_player_panel(&mut html, player);
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

pub fn render_error(status: u16, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Error {status}</title>\n\
         <style>{STYLE}</style>\n</head>\n<body>\n<h1>Error {status}</h1>\n<p class=\"notice\">{}</p>\n\
         <p><a href=\"/\">Back</a></p>\n</body>\n</html>\n",
        escape_html(message),
    )
}

fn render_form(html: &mut String, form: &FormValues) {
    let _ = write!(
        html,
        "<form method=\"post\" action=\"/\">\n\
         <label>Player 1 ID <input name=\"player1_id\" value=\"{}\" required></label>\n\
         <label>Player 2 ID <input name=\"player2_id\" value=\"{}\" required></label>\n\
         <label>Matches <input name=\"count_matches\" type=\"number\" min=\"0\" value=\"{}\" required></label>\n\
         <button type=\"submit\">Compare</button>\n</form>\n",
        escape_html(&form.player1_id),
        escape_html(&form.player2_id),
        form.count_matches,
    );
}

fn render_player_panel(html: &mut String, player: &PlayerRecord) {
    html.push_str("<section class=\"panel\">\n");

    if let Some(avatar) = player.avatar_url.as_deref().filter(|u| is_safe_url(u)) {
        let _ = writeln!(
            html,
            "<img class=\"avatar\" src=\"{}\" alt=\"avatar\">",
            escape_html(avatar)
        );
    }

    let _ = writeln!(
        html,
        "<h2>{} <small>({})</small></h2>",
        escape_html(&player.player_name),
        player.account_id
    );

    if player.status != PlayerStatus::Ready {
        let _ = writeln!(
            html,
            "<p class=\"notice\">{}</p>",
            escape_html(&player.status.describe())
        );
    }

    if let Some(e) = &player.hero_catalog_error {
        let _ = writeln!(
            html,
            "<p class=\"notice\">hero catalog unavailable: {}</p>",
            escape_html(&e.to_string())
        );
    }

    if player.rejected_matches > 0 {
        let _ = writeln!(
            html,
            "<p class=\"notice\">{} matches skipped (incomplete data)</p>",
            player.rejected_matches
        );
    }

    if let Some(summary) = player.summary() {
        let _ = writeln!(
            html,
            "<p class=\"summary\">Avg K/D/A: {:.1} / {:.1} / {:.1} &middot; KDA {:.2} &middot; Winrate {:.1}% ({} of {})</p>",
            summary.average_kills,
            summary.average_deaths,
            summary.average_assists,
            summary.average_kda,
            summary.win_rate,
            summary.wins,
            summary.matches,
        );
    }

    if !player.matches.is_empty() {
        html.push_str(
            "<table>\n<tr><th>Start</th><th>Hero</th><th>Result</th><th>K-D-A</th>\
             <th>GPM</th><th>XPM</th><th>Net worth</th></tr>\n",
        );
        for m in &player.matches {
            render_match_row(html, m);
        }
        html.push_str("</table>\n");
    }

    html.push_str("</section>\n");
}

fn render_match_row(html: &mut String, m: &MatchRecord) {
    let icon = m
        .hero_icon
        .as_deref()
        .filter(|u| is_safe_url(u))
        .map(|u| format!("<img class=\"hero-icon\" src=\"{}\" alt=\"\">", escape_html(u)))
        .unwrap_or_default();

    let class = match m.win_status {
        WinStatus::Won => "won",
        WinStatus::Lost => "lost",
    };

    let _ = writeln!(
        html,
        "<tr><td>{}</td><td>{}{}</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape_html(&m.start_time),
        icon,
        escape_html(&m.hero_name),
        class,
        m.win_status.as_str(),
        escape_html(&m.score),
        optional(m.gold_per_min),
        optional(m.xp_per_min),
        optional(m.net_worth),
    );
}

fn optional(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Only http(s) and site-relative URLs end up in src attributes
fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/')
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
