//! Reference entity configurations

use crate::column::{Align, BadgeOption, ColumnConfig, ColumnFormat};
use crate::entity::{EntityConfig, FilterConfig, FilterOption, SectionDefinition, SectionGroup};
use screenwright_core::{SortSpec, Tone};

pub fn all() -> Vec<EntityConfig> {
    vec![job(), candidate(), account(), contact(), placement(), deal()]
}

fn status_filter(config: &EntityConfig) -> FilterConfig {
    FilterConfig::select("status", FilterOption::from_statuses(config, "All Statuses"))
}

pub fn job() -> EntityConfig {
    let config = EntityConfig::new("job")
        .with_base_route("/employee/recruiting/jobs")
        .with_column(ColumnConfig::new("title").with_label("Job Title").sortable())
        .with_column(ColumnConfig::new("account").with_label("Client").with_path("account.name"))
        .with_column(ColumnConfig::new("location"))
        .with_column(ColumnConfig::new("jobType").with_label("Type").badge(vec![
            BadgeOption::new("full_time", "Full Time", Tone::Blue),
            BadgeOption::new("contract", "Contract", Tone::Purple),
            BadgeOption::new("contract_to_hire", "Contract to Hire", Tone::Amber),
            BadgeOption::new("part_time", "Part Time", Tone::Gray),
        ]))
        .with_column(ColumnConfig::new("status").with_format(ColumnFormat::Status))
        .with_column(
            ColumnConfig::new("positionsAvailable")
                .with_label("Openings")
                .with_format(ColumnFormat::Number),
        )
        .with_column(ColumnConfig::new("billRate").with_format(ColumnFormat::Currency))
        .with_column(
            ColumnConfig::new("createdAt")
                .with_label("Created")
                .with_format(ColumnFormat::Date)
                .sortable(),
        )
        .with_status("draft", "Draft", Tone::from_color_class("bg-charcoal-100 text-charcoal-700"))
        .with_status("open", "Open", Tone::Blue)
        .with_status("active", "Active", Tone::Green)
        .with_status("on_hold", "On Hold", Tone::Amber)
        .with_status("filled", "Filled", Tone::Purple)
        .with_status("cancelled", "Cancelled", Tone::Red)
        .with_status("closed", "Closed", Tone::Gray)
        .with_filter(FilterConfig::search("search", "Search jobs..."))
        .with_filter(FilterConfig::select(
            "jobType",
            vec![
                FilterOption::new("all", "All Types"),
                FilterOption::new("full_time", "Full Time"),
                FilterOption::new("contract", "Contract"),
                FilterOption::new("contract_to_hire", "Contract to Hire"),
                FilterOption::new("part_time", "Part Time"),
            ],
        ))
        .with_filter(FilterConfig::toggle("mine").with_label("My Jobs"))
        .with_section(SectionDefinition::overview("overview", "Overview").with_icon("LayoutDashboard"))
        .with_section(SectionDefinition::new("pipeline", "Pipeline", SectionGroup::Main).counted())
        .with_section(SectionDefinition::new("submissions", "Submissions", SectionGroup::Main).counted())
        .with_section(SectionDefinition::new("interviews", "Interviews", SectionGroup::Main).counted())
        .with_section(SectionDefinition::new("offers", "Offers", SectionGroup::Main).counted())
        .with_section(SectionDefinition::new("account", "Account", SectionGroup::Related))
        .with_section(SectionDefinition::new("contacts", "Contacts", SectionGroup::Related).counted())
        .with_section(SectionDefinition::new("activities", "Activities", SectionGroup::Tools).counted())
        .with_section(SectionDefinition::new("notes", "Notes", SectionGroup::Tools))
        .with_section(SectionDefinition::new("documents", "Documents", SectionGroup::Tools))
        .with_default_sort(SortSpec::desc("createdAt"));
    let filter = status_filter(&config);
    config.with_filter(filter)
}

pub fn candidate() -> EntityConfig {
    let config = EntityConfig::new("candidate")
        .with_base_route("/employee/recruiting/candidates")
        .with_column(ColumnConfig::new("fullName").with_label("Name").sortable())
        .with_column(ColumnConfig::new("title").with_label("Headline"))
        .with_column(ColumnConfig::new("location"))
        .with_column(ColumnConfig::new("status").with_format(ColumnFormat::Status))
        .with_column(
            ColumnConfig::new("availability").badge(vec![
                BadgeOption::new("immediate", "Immediate", Tone::Green),
                BadgeOption::new("one_week", "1 Week", Tone::Blue),
                BadgeOption::new("two_weeks", "2 Weeks", Tone::Amber),
            ]),
        )
        .with_column(ColumnConfig::new("desiredRate").with_format(ColumnFormat::Currency))
        .with_column(
            ColumnConfig::new("lastContactAt")
                .with_label("Last Contact")
                .with_format(ColumnFormat::Date)
                .sortable(),
        )
        .with_status("new", "New", Tone::Gray)
        .with_status("sourced", "Sourced", Tone::Purple)
        .with_status("screening", "Screening", Tone::Blue)
        .with_status("bench", "On Bench", Tone::Amber)
        .with_status("active", "Active", Tone::Green)
        .with_status("placed", "Placed", Tone::Amber)
        .with_status("inactive", "Inactive", Tone::Gray)
        .with_status("archived", "Archived", Tone::Red)
        .with_filter(FilterConfig::search("search", "Search candidates..."))
        .with_filter(FilterConfig::toggle("hotlist").with_label("Hotlist Only"))
        .with_section(SectionDefinition::overview("overview", "Overview"))
        .with_section(SectionDefinition::new("screening", "Screening", SectionGroup::Main))
        .with_section(SectionDefinition::new("submissions", "Submissions", SectionGroup::Main).counted())
        .with_section(SectionDefinition::new("placements", "Placements", SectionGroup::Main).counted())
        .with_section(SectionDefinition::new("compliance", "Compliance", SectionGroup::Main).alerting())
        .with_section(SectionDefinition::new("jobs", "Jobs", SectionGroup::Related).counted())
        .with_section(SectionDefinition::new("activities", "Activities", SectionGroup::Tools).counted())
        .with_section(SectionDefinition::new("documents", "Documents", SectionGroup::Tools).counted())
        .with_default_sort(SortSpec::desc("lastContactAt"));
    let filter = status_filter(&config);
    config.with_filter(filter)
}

pub fn account() -> EntityConfig {
    let config = EntityConfig::new("account")
        .with_base_route("/employee/recruiting/accounts")
        .with_column(ColumnConfig::new("name").with_label("Account").sortable())
        .with_column(ColumnConfig::new("industry"))
        .with_column(ColumnConfig::new("status").with_format(ColumnFormat::Status))
        .with_column(
            ColumnConfig::new("openJobs")
                .with_label("Open Jobs")
                .with_format(ColumnFormat::Number),
        )
        .with_column(
            ColumnConfig::new("healthScore")
                .with_label("Health")
                .with_format(ColumnFormat::Percentage),
        )
        .with_column(ColumnConfig::new("owner").with_path("owner.fullName"))
        .with_status("prospect", "Prospect", Tone::Blue)
        .with_status("pending_approval", "Pending Approval", Tone::Blue)
        .with_status("active", "Active", Tone::Green)
        .with_status("inactive", "Inactive", Tone::Gray)
        .with_status("on_hold", "On Hold", Tone::Amber)
        .with_status("churned", "Churned", Tone::Red)
        .with_status("do_not_use", "Do Not Use", Tone::Red)
        .with_filter(FilterConfig::search("search", "Search accounts..."))
        .with_filter(FilterConfig::select(
            "industry",
            vec![
                FilterOption::new("all", "All Industries"),
                FilterOption::new("technology", "Technology"),
                FilterOption::new("healthcare", "Healthcare"),
                FilterOption::new("finance", "Finance"),
            ],
        ))
        .with_section(SectionDefinition::overview("overview", "Overview"))
        .with_section(SectionDefinition::new("contacts", "Contacts", SectionGroup::Main).counted())
        .with_section(SectionDefinition::new("contracts", "Contracts", SectionGroup::Main))
        .with_section(SectionDefinition::new("jobs", "Jobs", SectionGroup::Main).counted())
        .with_section(SectionDefinition::new("placements", "Placements", SectionGroup::Main).counted())
        .with_section(SectionDefinition::new("activities", "Activities", SectionGroup::Tools).counted())
        .with_section(SectionDefinition::new("settings", "Settings", SectionGroup::Settings))
        .with_default_sort(SortSpec::asc("name"));
    let filter = status_filter(&config);
    config.with_filter(filter)
}

pub fn contact() -> EntityConfig {
    EntityConfig::new("contact")
        .with_base_route("/employee/contacts")
        .with_column(ColumnConfig::new("fullName").with_label("Name").sortable())
        .with_column(ColumnConfig::new("title"))
        .with_column(ColumnConfig::new("account").with_path("account.name"))
        .with_column(ColumnConfig::new("email"))
        .with_column(ColumnConfig::new("phone"))
        .with_column(ColumnConfig::new("status").with_format(ColumnFormat::Status))
        .with_status("active", "Active", Tone::Green)
        .with_status("inactive", "Inactive", Tone::Gray)
        .with_filter(FilterConfig::search("search", "Search contacts..."))
        .with_section(SectionDefinition::overview("overview", "Overview"))
        .with_section(SectionDefinition::new("accounts", "Accounts", SectionGroup::Related))
        .with_section(SectionDefinition::new("jobs", "Jobs", SectionGroup::Related).counted())
        .with_section(SectionDefinition::new("activities", "Activities", SectionGroup::Tools).counted())
        .with_section(SectionDefinition::new("campaigns", "Campaigns", SectionGroup::Automation))
        .with_default_sort(SortSpec::asc("fullName"))
}

pub fn placement() -> EntityConfig {
    let config = EntityConfig::new("placement")
        .with_base_route("/employee/recruiting/placements")
        .with_column(ColumnConfig::new("candidate").with_path("candidate.fullName"))
        .with_column(ColumnConfig::new("job").with_path("job.title"))
        .with_column(ColumnConfig::new("account").with_label("Client").with_path("account.name"))
        .with_column(ColumnConfig::new("status").with_format(ColumnFormat::Status))
        .with_column(
            ColumnConfig::new("health").badge(vec![
                BadgeOption::new("healthy", "Healthy", Tone::Green),
                BadgeOption::new("at_risk", "At Risk", Tone::Amber),
                BadgeOption::new("critical", "Critical", Tone::Red),
            ]),
        )
        .with_column(ColumnConfig::new("billRate").with_format(ColumnFormat::Currency))
        .with_column(ColumnConfig::new("startDate").with_format(ColumnFormat::Date).sortable())
        .with_column(ColumnConfig::new("endDate").with_format(ColumnFormat::Date))
        .with_status("pending_start", "Pending Start", Tone::Gray)
        .with_status("active", "Active", Tone::Green)
        .with_status("extended", "Extended", Tone::Blue)
        .with_status("ended", "Ended", Tone::Gray)
        .with_status("completed", "Completed", Tone::Amber)
        .with_status("terminated", "Terminated", Tone::Red)
        .with_status("on_hold", "On Hold", Tone::Amber)
        .with_filter(FilterConfig::search("search", "Search placements..."))
        .with_section(SectionDefinition::overview("overview", "Overview"))
        .with_section(SectionDefinition::new("timesheets", "Timesheets", SectionGroup::Main).counted())
        .with_section(SectionDefinition::new("checkins", "Check-ins", SectionGroup::Main).alerting())
        .with_section(SectionDefinition::new("documents", "Documents", SectionGroup::Tools))
        .with_default_sort(SortSpec::desc("startDate"));
    let filter = status_filter(&config);
    config.with_filter(filter)
}

pub fn deal() -> EntityConfig {
    let config = EntityConfig::new("deal")
        .with_base_route("/employee/crm/deals")
        .with_column(ColumnConfig::new("name").with_label("Deal").sortable())
        .with_column(ColumnConfig::new("account").with_path("account.name"))
        .with_column(ColumnConfig::new("status").with_label("Stage").with_format(ColumnFormat::Status))
        .with_column(ColumnConfig::new("value").with_format(ColumnFormat::Currency).sortable())
        .with_column(
            ColumnConfig::new("probability")
                .with_format(ColumnFormat::Percentage)
                .with_align(Align::Center),
        )
        .with_column(ColumnConfig::new("expectedCloseDate").with_label("Close Date").with_format(ColumnFormat::Date))
        .with_status("discovery", "Discovery", Tone::Gray)
        .with_status("qualification", "Qualification", Tone::Blue)
        .with_status("proposal", "Proposal", Tone::Purple)
        .with_status("negotiation", "Negotiation", Tone::Amber)
        .with_status("verbal_commit", "Verbal Commit", Tone::Orange)
        .with_status("closed_won", "Closed Won", Tone::Green)
        .with_status("closed_lost", "Closed Lost", Tone::Red)
        .with_filter(FilterConfig::search("search", "Search deals..."))
        .with_section(SectionDefinition::overview("overview", "Overview"))
        .with_section(SectionDefinition::new("stakeholders", "Stakeholders", SectionGroup::Main).counted())
        .with_section(SectionDefinition::new("activities", "Activities", SectionGroup::Tools).counted())
        .with_default_sort(SortSpec::desc("value"));
    let filter = status_filter(&config);
    config.with_filter(filter)
}
