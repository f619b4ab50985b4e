//! Human-friendly output for a finished briefing.

use std::fmt::Write;

use citybrief_core::{CityReport, Headlines};

const BOLD_BLUE: &str = "\x1b[1;34m";
const BOLD_PURPLE: &str = "\x1b[1;35m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Temperature and wind speed under bare headers.
    Plain,
    /// Colored headers naming the city, plus wind direction, condition and observation time.
    Rich,
}

pub const NO_ARTICLES: &str = "No news articles found.";

pub fn render_report(report: &CityReport, style: Style) -> String {
    let mut out = String::new();
    let weather = &report.weather;
    let city = title_case(&report.city);

    match style {
        Style::Plain => out.push_str("\nWeather:\n"),
        Style::Rich => {
            let _ = writeln!(out, "{BOLD_BLUE}\nWeather in {city}:{RESET}");
        }
    }

    let _ = writeln!(out, "Temperature: {}°C", decimal(weather.temperature_c));
    let _ = writeln!(out, "Wind speed: {} m/s", decimal(weather.wind_speed_mps));

    if style == Style::Rich {
        let _ = writeln!(out, "Wind direction: {}°", weather.wind_direction_deg);
        let _ = writeln!(out, "Condition: {}", weather.condition());
        if let Some(observed_at) = weather.observed_at {
            let _ = writeln!(out, "Observed at: {} (local)", observed_at.format("%Y-%m-%d %H:%M"));
        }
    }

    match style {
        Style::Plain => out.push_str("\nTop News:\n"),
        Style::Rich => {
            let _ = writeln!(out, "{BOLD_PURPLE}\nTop News in {city}:{RESET}");
        }
    }

    match &report.headlines {
        Headlines::Missing => {
            let _ = writeln!(out, "{NO_ARTICLES}");
        }
        Headlines::Found(articles) => {
            for article in articles {
                let _ = writeln!(out, "- {}", article.title);
                let _ = writeln!(out, "  {}", article.url);
            }
        }
    }

    out
}

/// Integral values keep one decimal place, as they appear in the upstream JSON.
fn decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use citybrief_core::{Coordinates, NewsArticle, Place, WeatherReport};

    fn report(code: i32, headlines: Headlines) -> CityReport {
        CityReport {
            city: "new york".to_string(),
            place: Place {
                name: Some("New York".to_string()),
                country: Some("United States".to_string()),
                coordinates: Coordinates {
                    latitude: 40.71427,
                    longitude: -74.00597,
                },
            },
            weather: WeatherReport {
                temperature_c: 21.5,
                wind_speed_mps: 3.2,
                wind_direction_deg: 270.0,
                weather_code: code,
                observed_at: NaiveDate::from_ymd_opt(2024, 6, 1)
                    .and_then(|d| d.and_hms_opt(9, 30, 0)),
            },
            headlines,
        }
    }

    fn two_articles() -> Headlines {
        Headlines::Found(vec![
            NewsArticle {
                title: "Subway expands".to_string(),
                url: "https://news.example/1".to_string(),
            },
            NewsArticle {
                title: "Heat wave ahead".to_string(),
                url: "https://news.example/2".to_string(),
            },
        ])
    }

    #[test]
    fn title_case_follows_word_boundaries() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("SAINT-DENIS"), "Saint-Denis");
        assert_eq!(title_case("o'hare"), "O'Hare");
        assert_eq!(title_case("münchen"), "München");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn integral_readings_keep_one_decimal() {
        let mut calm = report(0, Headlines::Missing);
        calm.weather.temperature_c = 7.0;
        calm.weather.wind_speed_mps = 0.0;

        let out = render_report(&calm, Style::Plain);

        assert!(out.contains("Temperature: 7.0°C\n"));
        assert!(out.contains("Wind speed: 0.0 m/s\n"));
        assert_eq!(decimal(-3.25), "-3.25");
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let out = render_report(&report(0, two_articles()), Style::Plain);

        assert!(!out.contains('\x1b'));
        assert!(out.contains("\nWeather:\n"));
        assert!(out.contains("Temperature: 21.5°C\n"));
        assert!(out.contains("Wind speed: 3.2 m/s\n"));
        assert!(!out.contains("Condition:"));
        assert!(out.contains("- Subway expands\n  https://news.example/1\n"));
    }

    #[test]
    fn rich_output_names_city_and_condition() {
        let out = render_report(&report(95, two_articles()), Style::Rich);

        assert!(out.contains(&format!("{BOLD_BLUE}\nWeather in New York:{RESET}")));
        assert!(out.contains(&format!("{BOLD_PURPLE}\nTop News in New York:{RESET}")));
        assert!(out.contains("Wind direction: 270°\n"));
        assert!(out.contains("Condition: Thunderstorm\n"));
        assert!(out.contains("Observed at: 2024-06-01 09:30 (local)\n"));
    }

    #[test]
    fn unknown_code_uses_fallback_text() {
        let out = render_report(&report(9999, two_articles()), Style::Rich);
        assert!(out.contains("Condition: Unknown weather\n"));
    }

    #[test]
    fn missing_articles_still_shows_weather() {
        let out = render_report(&report(3, Headlines::Missing), Style::Plain);

        assert!(out.contains("Temperature: 21.5°C"));
        assert!(out.contains(NO_ARTICLES));
        assert!(!out.contains("- "));
    }

    #[test]
    fn empty_article_list_prints_nothing_under_header() {
        let out = render_report(&report(3, Headlines::Found(vec![])), Style::Plain);

        assert!(out.ends_with("\nTop News:\n"));
        assert!(!out.contains(NO_ARTICLES));
    }
}
