use std::fmt::Write;
use std::path::Path;

use crate::config::MissingSetting;

/// Text shown instead of running a command while the remote store is not
/// configured.
pub fn setup_instructions(missing: &[MissingSetting], config_path: &Path) -> String {
    let mut out = String::from("The remote store is not configured yet.\n\n");

    let _ = writeln!(out, "Add to {} under [remote]:", config_path.display());
    for setting in missing {
        let example = match setting {
            MissingSetting::BaseUrl => "\"https://<project>.supabase.co\"",
            MissingSetting::AccessKey => "\"<anon key>\"",
        };
        let _ = writeln!(out, "  {} = {}", setting.config_key(), example);
    }

    out.push_str("\nor set these environment variables:\n");
    for setting in missing {
        let _ = writeln!(out, "  {}", setting.env_var());
    }
    out
}
