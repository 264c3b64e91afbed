//! Case and attachment command definitions

use clap::Subcommand;
use supportctl_core::types::{IssueType, Language, SeverityCode};

#[derive(Subcommand, Debug)]
pub enum CaseCommands {
    /// Open a new support case
    #[command(after_help = "EXAMPLES:
    # Technical case against a service
    supportctl case create --subject \"EC2 instance unreachable\" \\
      --body \"i-0abc123 stopped answering at 10:00 UTC\" \\
      --service-code amazon-elastic-compute-cloud-linux \\
      --category-code instance-issue --severity high

    # Account or billing question
    supportctl case create --issue-type customer-service \\
      --subject \"Invoice question\" --body \"...\"

    # Attach files uploaded with 'attachment add'
    supportctl case create --subject S --body B --attachment-set-id <SET_ID>
")]
    Create {
        /// Case title
        #[arg(long)]
        subject: String,

        /// Initial communication text
        #[arg(long)]
        body: String,

        /// Service code from 'supportctl service list'
        #[arg(long)]
        service_code: Option<String>,

        /// Category code within the service
        #[arg(long)]
        category_code: Option<String>,

        /// Severity; availability depends on the support plan
        #[arg(long, value_enum)]
        severity: Option<SeverityCode>,

        /// Kind of case
        #[arg(long, value_enum)]
        issue_type: Option<IssueType>,

        /// Language for the case (defaults to the profile language)
        #[arg(long, value_enum)]
        language: Option<Language>,

        /// Email address to copy on correspondence (repeatable)
        #[arg(long = "cc", value_name = "EMAIL")]
        cc_email_addresses: Vec<String>,

        /// Attachment set from 'supportctl attachment add'
        #[arg(long)]
        attachment_set_id: Option<String>,
    },

    /// List cases
    #[command(visible_alias = "ls")]
    #[command(after_help = "EXAMPLES:
    # Open cases
    supportctl case list

    # Everything, including resolved cases, across all pages
    supportctl case list --include-resolved --all

    # Cases created in a window
    supportctl case list --after 2024-01-01T00:00:00Z --before 2024-02-01T00:00:00Z

    # Only case IDs of urgent cases
    supportctl case list -q 'cases[?severityCode==`urgent`].caseId'
")]
    List {
        /// Restrict to these case IDs (repeatable, at most 100)
        #[arg(long = "case-id", value_name = "CASE_ID")]
        case_ids: Vec<String>,

        /// Restrict to the case with this display ID
        #[arg(long)]
        display_id: Option<String>,

        /// Only cases created after this ISO-8601 time
        #[arg(long)]
        after: Option<String>,

        /// Only cases created before this ISO-8601 time
        #[arg(long)]
        before: Option<String>,

        /// Include resolved cases
        #[arg(long)]
        include_resolved: bool,

        /// Include recent communications in each case (service default: true)
        #[arg(long, value_name = "BOOL")]
        include_communications: Option<bool>,

        /// Language for returned text
        #[arg(long, value_enum)]
        language: Option<Language>,

        /// Page size (10-100)
        #[arg(long)]
        max_results: Option<i32>,

        /// Page token from a previous response
        #[arg(long, conflicts_with = "all")]
        next_token: Option<String>,

        /// Follow page tokens and return every matching case
        #[arg(long)]
        all: bool,
    },

    /// Show one case, resolved or not
    #[command(visible_alias = "show")]
    Get {
        /// Case ID (e.g. case-12345678910-2013-c4c1d2bf33c5cf47)
        case_id: String,
    },

    /// List communications on a case
    #[command(visible_alias = "comms")]
    Communications {
        /// Case ID
        case_id: String,

        /// Only communications after this ISO-8601 time
        #[arg(long)]
        after: Option<String>,

        /// Only communications before this ISO-8601 time
        #[arg(long)]
        before: Option<String>,

        /// Page size (10-100)
        #[arg(long)]
        max_results: Option<i32>,

        /// Page token from a previous response
        #[arg(long, conflicts_with = "all")]
        next_token: Option<String>,

        /// Follow page tokens and return every communication
        #[arg(long)]
        all: bool,
    },

    /// Add a communication to a case
    #[command(visible_alias = "comment")]
    Reply {
        /// Case ID
        case_id: String,

        /// Communication text
        #[arg(long)]
        body: String,

        /// Email address to copy (repeatable)
        #[arg(long = "cc", value_name = "EMAIL")]
        cc_email_addresses: Vec<String>,

        /// Attachment set from 'supportctl attachment add'
        #[arg(long)]
        attachment_set_id: Option<String>,
    },

    /// Resolve a case
    #[command(visible_alias = "close")]
    Resolve {
        /// Case ID
        case_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AttachmentCommands {
    /// Upload files into a new or existing attachment set
    #[command(after_help = "EXAMPLES:
    # New attachment set
    supportctl attachment add error.log screenshot.png

    # Add to an existing set before it expires
    supportctl attachment add trace.txt --attachment-set-id <SET_ID>

    # Capture just the set ID for a follow-up command
    supportctl attachment add error.log -q attachmentSetId
")]
    Add {
        /// Files to upload (at most 3 per set, 5 MB each)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,

        /// Existing attachment set to add to
        #[arg(long)]
        attachment_set_id: Option<String>,
    },

    /// Fetch an attachment
    Get {
        /// Attachment ID, from a communication's attachment set
        attachment_id: String,

        /// Write the decoded file contents here instead of printing them
        #[arg(long, value_name = "PATH")]
        save: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ServiceCommands {
    /// List services and their categories
    #[command(visible_alias = "ls")]
    List {
        /// Restrict to these service codes (repeatable)
        #[arg(long = "code", value_name = "SERVICE_CODE")]
        service_codes: Vec<String>,

        /// Language for names
        #[arg(long, value_enum)]
        language: Option<Language>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SeverityCommands {
    /// List severity levels available to the account
    #[command(visible_alias = "ls")]
    List {
        /// Language for names
        #[arg(long, value_enum)]
        language: Option<Language>,
    },
}
