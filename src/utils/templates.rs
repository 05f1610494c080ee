//! Server-rendered page templates.

use super::escape_html;

/// Admin login form posting `email` and `password` to `login_path`.
pub fn login_page(site_name: &str, login_path: &str) -> String {
    let site_name = escape_html(site_name);
    let login_path = escape_html(login_path);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{site_name} - Login</title>
    <style>
        body {{ font-family: sans-serif; background: #f5f5f5; }}
        form {{ max-width: 320px; margin: 10vh auto; padding: 24px; background: white; border-radius: 4px; }}
        label, input, button {{ display: block; width: 100%; box-sizing: border-box; }}
        input {{ margin: 4px 0 16px; padding: 8px; }}
        button {{ padding: 8px; background: rgb(33,150,243); color: white; border: 0; }}
    </style>
</head>
<body>
    <form method="post" action="{login_path}">
        <h1>{site_name}</h1>
        <label for="email">Email</label>
        <input type="email" id="email" name="email" autofocus>
        <label for="password">Password</label>
        <input type="password" id="password" name="password">
        <button type="submit">Sign in</button>
    </form>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_posts_to_login_path() {
        let page = login_page("My Admin Interface", "/back/login");
        assert!(page.contains(r#"action="/back/login""#));
        assert!(page.contains("<title>My Admin Interface - Login</title>"));
        assert!(page.contains(r#"name="email""#));
        assert!(page.contains(r#"name="password""#));
    }

    #[test]
    fn site_name_is_escaped() {
        assert!(login_page("<Bar>", "/login").contains("&lt;Bar&gt;"));
    }
}
