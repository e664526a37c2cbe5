use super::html_escape;
use super::surface::OutputSurface;

/// Render the whole page: search form on top, the surface's grid below.
pub fn render_page(surface: &OutputSurface, fetching: bool, stylesheet: Option<&str>) -> String {
    let query = surface.query().unwrap_or("");
    let heading = match surface.query() {
        Some(q) => format!("Results for &ldquo;{}&rdquo;", html_escape(q)),
        None => "Popular movies".to_string(),
    };
    let status = if fetching {
        r#"<p class="status">Loading&hellip;</p>"#
    } else {
        ""
    };
    let stylesheet = stylesheet
        .map(|href| format!(r#"<link rel="stylesheet" href="{}">"#, html_escape(href)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Movies</title>
    <style>{css}</style>
    {stylesheet}
</head>
<body>
    <header>
        <a class="home" href="/popular">Popular</a>
        <form id="form" method="post" action="/search">
            <input type="text" name="query" class="search" placeholder="Search" value="{query}">
            <button type="submit">Search</button>
        </form>
    </header>
    <h2 class="heading">{heading}</h2>
    {status}
    <main class="main">
{grid}    </main>
</body>
</html>
"#,
        css = INLINE_CSS,
        stylesheet = stylesheet,
        query = html_escape(query),
        heading = heading,
        status = status,
        grid = surface.to_html(),
    )
}

const INLINE_CSS: &str = r#"
* { box-sizing: border-box; }
body { background-color: #22254b; font-family: sans-serif; margin: 0; }
header { display: flex; justify-content: space-between; align-items: center; padding: 1rem; background-color: #373b69; }
header a.home { color: #eee; text-decoration: none; font-weight: bold; }
.search { background-color: transparent; border: 2px solid #22254b; border-radius: 50px; color: #fff; font-size: 1rem; padding: 0.5rem 1rem; }
.search:focus { outline: none; background-color: #22254b; }
.heading, .status { color: #eee; padding: 0 1rem; }
.main { display: flex; flex-wrap: wrap; justify-content: center; }
.movie { background-color: #373b69; border-radius: 3px; box-shadow: 0 4px 5px rgba(0, 0, 0, 0.2); margin: 1rem; width: 300px; position: relative; overflow: hidden; }
.movie img { width: 100%; }
.movie-info { color: #eee; display: flex; align-items: center; justify-content: space-between; gap: 0.2rem; padding: 0.5rem 1rem 1rem; }
.movie-info h3 { margin-top: 0; }
.movie-info span { background-color: #22254b; padding: 0.25rem 0.5rem; border-radius: 3px; font-weight: bold; }
.movie-info span.green { color: lightgreen; }
.movie-info span.orange { color: orange; }
.movie-info span.red { color: red; }
.overview { background-color: #fff; padding: 2rem; position: absolute; left: 0; bottom: 0; right: 0; max-height: 100%; transform: translateY(101%); overflow-y: auto; transition: transform 0.3s ease-in; }
.movie:hover .overview { transform: translateY(0); }
.error { color: #ffb4b4; background-color: #373b69; border-radius: 3px; margin: 2rem; padding: 1rem 2rem; }
"#;
