// Tools registered by the server at startup

use serde::Serialize;
use toolvault::{tool, RegistrationError, Toolbox};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Weather {
    pub location: String,
    pub temperature: f64,
    pub unit: String,
    pub conditions: String,
}

#[tool]
/// Shout the statement provided, returning it in upper case.
fn shout(
    /// The statement to shout
    statement: &str,
) -> String {
    format!("{}!", statement.to_uppercase())
}

#[tool]
/// Get the current weather for a location.
fn get_weather(
    /// City name, e.g. "Paris"
    location: String,
    /// Temperature unit, "celsius" or "fahrenheit"
    #[default("celsius")]
    unit: String,
) -> Result<Weather, String> {
    let celsius = 18.5;
    let temperature = match unit.as_str() {
        "celsius" => celsius,
        "fahrenheit" => celsius * 9.0 / 5.0 + 32.0,
        other => return Err(format!("Unsupported unit: {}", other)),
    };

    Ok(Weather {
        location,
        temperature,
        unit,
        conditions: "Partly cloudy".to_string(),
    })
}

#[tool]
/// Get the latest stock price for a ticker symbol.
async fn get_stock_price(
    /// Ticker symbol, e.g. "ACME"
    symbol: String,
) -> Result<f64, String> {
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("Invalid ticker symbol: {:?}", symbol));
    }
    // Deterministic quote derived from the symbol
    let cents: u32 = symbol
        .to_ascii_uppercase()
        .bytes()
        .map(u32::from)
        .sum();
    Ok(f64::from(cents) / 4.0)
}

pub async fn register_all(toolbox: &Toolbox) -> Result<(), RegistrationError> {
    toolbox.register(shout_tool::function()).await?;
    toolbox.register(get_weather_tool::function()).await?;
    toolbox.register(get_stock_price_tool::function()).await?;
    Ok(())
}
