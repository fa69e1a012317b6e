//! Console feature-flag handlers.

use botdeck_api::ConsoleClient;
use botdeck_api::console::{FeatureFlag, FeatureFlagResponse};
use tabled::Tabled;

use crate::cli::{FeaturesArgs, FeaturesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

#[derive(Tabled)]
struct FlagRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Editable")]
    editable: String,
    #[tabled(rename = "Category")]
    category: String,
}

fn flag_row(f: &FeatureFlag, painter: Painter) -> FlagRow {
    FlagRow {
        key: f.key.clone(),
        label: f.label.clone(),
        value: painter.maybe_flag(f.value),
        editable: painter.flag(f.editable),
        category: f.category.clone(),
    }
}

fn flags_table(resp: &FeatureFlagResponse, painter: Painter) -> String {
    let rows: Vec<FlagRow> = resp.features.iter().map(|f| flag_row(f, painter)).collect();
    let mut out = output::render_table(&rows);
    if !resp.placeholders.is_empty() {
        let rows: Vec<FlagRow> = resp
            .placeholders
            .iter()
            .map(|f| flag_row(f, painter))
            .collect();
        out.push_str("\n\n");
        out.push_str(&painter.heading("Coming soon"));
        out.push('\n');
        out.push_str(&output::render_table(&rows));
    }
    out
}

pub async fn handle(
    console: &ConsoleClient,
    args: FeaturesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let painter = Painter::new(global);
    match args.command {
        FeaturesCommand::List => {
            let flags = console.fetch_feature_flags().await?;
            let out = output::render_single(
                &global.output,
                &flags,
                |r| flags_table(r, painter),
                |r| {
                    r.features
                        .iter()
                        .map(|f| f.key.clone())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FeaturesCommand::Set { key, value } => {
            let flag = console.update_feature_flag(&key, value).await?;
            util::notice(
                &format!("{} set to {}", flag.key, painter.maybe_flag(flag.value)),
                global.quiet,
            );
            let out = output::render_list(
                &global.output,
                std::slice::from_ref(&flag),
                |f| flag_row(f, painter),
                |f| f.key.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(key: &str, value: Option<bool>, editable: bool) -> FeatureFlag {
        FeatureFlag {
            key: key.into(),
            label: key.into(),
            description: String::new(),
            value,
            editable,
            category: "general".into(),
        }
    }

    #[test]
    fn placeholders_render_in_their_own_section() {
        let resp = FeatureFlagResponse {
            features: vec![flag("allow_r18g", Some(true), true)],
            placeholders: vec![flag("voice_reply", None, false)],
        };
        let out = flags_table(&resp, Painter::plain());
        let split = out.find("Coming soon").unwrap_or(0);
        assert!(split > 0);
        assert!(out[..split].contains("allow_r18g"));
        assert!(out[split..].contains("voice_reply"));
    }

    #[test]
    fn tri_state_value_shows_dash_when_unset() {
        let row = flag_row(&flag("voice_reply", None, false), Painter::plain());
        assert_eq!(row.value, "-");
        assert_eq!(row.editable, "no");
    }
}
