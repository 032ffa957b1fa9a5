//! Startup banner and session summary display.

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub auth_status: &'a str,
    pub template: &'a str,
    pub redirect_uri: &'a str,
    pub db_path: &'a str,
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║          S L I D E C A R D            ║
   ║   your Slack profile, as a slide      ║
   ╚═══════════════════════════════════════╝

   version   {}
   auth      {}
   template  {}
   redirect  {}
   storage   {}
"#,
        env!("CARGO_PKG_VERSION"),
        info.auth_status,
        info.template,
        info.redirect_uri,
        info.db_path,
    );
}

/// Print the session summary (card link, if one was created).
pub fn print_session_summary(card_url: Option<&str>) {
    if let Some(url) = card_url {
        println!("your card: {url}");
    }
    println!("goodbye.");
}
