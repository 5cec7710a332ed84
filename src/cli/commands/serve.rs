//! Web server command.

use console::style;

use crate::config::Settings;

/// Port used when the bind address names only a host.
const DEFAULT_PORT: u16 = 3232;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: Option<&str>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or(&settings.bind);
    let (host, port) = parse_bind_address(bind);

    println!(
        "{} Loading dataset from {}",
        style("→").cyan(),
        settings.dataset_path.display()
    );
    println!(
        "{} Starting Classify server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "3232" -> 127.0.0.1:3232
/// - Just a host: "0.0.0.0" -> 0.0.0.0:3232
/// - Host and port: "0.0.0.0:8080" -> 0.0.0.0:8080
fn parse_bind_address(bind: &str) -> (String, u16) {
    if let Ok(port) = bind.parse::<u16>() {
        return ("127.0.0.1".to_string(), port);
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return (host.to_string(), port);
        }
    }

    (bind.to_string(), DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(parse_bind_address("8080"), ("127.0.0.1".to_string(), 8080));
        assert_eq!(parse_bind_address("0.0.0.0"), ("0.0.0.0".to_string(), 3232));
        assert_eq!(
            parse_bind_address("localhost:9000"),
            ("localhost".to_string(), 9000)
        );
    }
}
