//! Platforms command - print the supported platform table

use crate::error::AvakitResult;
use crate::platform::{AuthScheme, PlatformId};
use console::style;

/// Execute the platforms command
pub async fn execute() -> AvakitResult<()> {
    println!("{:<12} {:<42} {:<12}", "PLATFORM", "PROBE", "AUTH");
    println!("{}", "-".repeat(66));

    for id in PlatformId::ALL {
        let auth = match id.spec().auth {
            AuthScheme::BasicToken => "Basic".to_string(),
            AuthScheme::Header(name) => name.to_string(),
        };
        println!(
            "{:<12} {:<42} {:<12}",
            style(id.as_str()).bold(),
            id.probe_url(),
            auth
        );
    }

    Ok(())
}
