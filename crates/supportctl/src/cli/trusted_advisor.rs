//! Trusted Advisor command definitions

use clap::Subcommand;
use supportctl_core::types::Language;

#[derive(Subcommand, Debug)]
pub enum TrustedAdvisorCommands {
    /// List every check with its metadata columns
    #[command(visible_alias = "ls")]
    Checks {
        /// Language for names and descriptions
        #[arg(long, value_enum)]
        language: Option<Language>,
    },

    /// Show the latest result of a check
    #[command(after_help = "EXAMPLES:
    # Full result
    supportctl trusted-advisor result Pfx0RwqBli

    # Only flagged resource IDs
    supportctl trusted-advisor result Pfx0RwqBli -q 'result.flaggedResources[].resourceId'
")]
    Result {
        /// Check ID from 'trusted-advisor checks'
        check_id: String,

        /// Language for returned text
        #[arg(long, value_enum)]
        language: Option<Language>,
    },

    /// Show summaries for one or more checks
    Summaries {
        /// Check IDs
        #[arg(required = true, value_name = "CHECK_ID")]
        check_ids: Vec<String>,
    },

    /// Ask the service to refresh a check
    Refresh {
        /// Check ID
        check_id: String,
    },

    /// Show refresh status for one or more checks
    RefreshStatus {
        /// Check IDs
        #[arg(required = true, value_name = "CHECK_ID")]
        check_ids: Vec<String>,
    },
}
