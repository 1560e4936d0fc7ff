//! Reference screen definitions

use crate::action::{ActionDescriptor, ConfirmSpec, ExportFormat};
use crate::binding::Binding;
use crate::column::{BadgeOption, ColumnConfig, ColumnFormat};
use crate::condition::{Condition, Operator, Visibility};
use crate::data_source::{DataSource, NamedQuery};
use crate::layout::{Layout, MetricConfig, Section, Tab};
use crate::screen::{Breadcrumb, ScreenDefinition, ScreenKind};
use screenwright_core::{SortSpec, Tone, Variant};
use serde_json::json;

pub fn all() -> Vec<ScreenDefinition> {
    vec![recruiter_dashboard(), jobs_list(), job_detail(), consultant_detail()]
}

fn submission_status() -> ColumnConfig {
    ColumnConfig::new("status").badge(vec![
        BadgeOption::new("submitted", "Submitted", Tone::Blue),
        BadgeOption::new("client_review", "Client Review", Tone::Purple),
        BadgeOption::new("client_interview", "Interviewing", Tone::Amber),
        BadgeOption::new("offer_stage", "Offer", Tone::Orange),
        BadgeOption::new("placed", "Placed", Tone::Green),
        BadgeOption::new("rejected", "Rejected", Tone::Red),
    ])
}

// ============================================================================
// Recruiter dashboard
// ============================================================================

pub fn recruiter_dashboard() -> ScreenDefinition {
    let source = DataSource::aggregate(vec![
        NamedQuery::new("sprintMetrics", "dashboard.getSprintProgress"),
        NamedQuery::new("tasks", "dashboard.getTasks").with_param("limit", Binding::literal(15)),
        NamedQuery::new("pipelineHealth", "dashboard.getPipelineHealth"),
        NamedQuery::new("accountHealth", "dashboard.getAccountHealth"),
        NamedQuery::new("recentWins", "dashboard.getRecentWins")
            .with_param("recruiterId", Binding::context("user.id")),
    ]);

    let sections = vec![
        Section::metrics(
            "sprint-progress",
            vec![
                MetricConfig::progress("placements", "Placements", "sprintMetrics.placements")
                    .with_thresholds(100.0, 50.0)
                    .with_icon("Trophy"),
                MetricConfig::progress("revenue", "Revenue", "sprintMetrics.revenue")
                    .with_format(ColumnFormat::Currency)
                    .with_thresholds(100.0, 70.0)
                    .with_icon("DollarSign"),
                MetricConfig::progress("submissions", "Submissions", "sprintMetrics.submissions")
                    .with_thresholds(100.0, 80.0)
                    .with_icon("Send"),
                MetricConfig::progress("interviews", "Interviews", "sprintMetrics.interviews")
                    .with_thresholds(100.0, 67.0)
                    .with_icon("Video"),
                MetricConfig::progress("jobFill", "Job Fill Rate", "sprintMetrics.jobFill")
                    .with_format(ColumnFormat::Percentage)
                    .with_thresholds(50.0, 30.0)
                    .with_icon("Briefcase"),
            ],
        )
        .titled("Sprint Progress"),
        Section::custom(
            "todays-priorities",
            "ActivityQueueWidget",
            json!({ "groupBy": "urgency", "maxItemsPerGroup": 5, "showCompleteButton": true }),
        )
        .titled("Today's Priorities")
        .with_action(
            ActionDescriptor::navigate("view-all-tasks", "View All Tasks", "/employee/workspace/tasks")
                .with_variant(Variant::Ghost)
                .with_icon("ArrowRight"),
        ),
        Section::info_card(
            "pipeline-health",
            vec![
                ColumnConfig::new("activeJobs")
                    .with_path("pipelineHealth.activeJobs")
                    .with_format(ColumnFormat::Number),
                ColumnConfig::new("submissionsPending")
                    .with_path("pipelineHealth.submissionsPending")
                    .with_format(ColumnFormat::Number),
                ColumnConfig::new("interviewsThisWeek")
                    .with_path("pipelineHealth.interviewsThisWeek")
                    .with_format(ColumnFormat::Number),
                ColumnConfig::new("offersOutstanding")
                    .with_path("pipelineHealth.offersOutstanding")
                    .with_format(ColumnFormat::Number),
            ],
        )
        .titled("Pipeline Health"),
        Section::table(
            "account-portfolio",
            vec![
                ColumnConfig::new("name").with_label("Account"),
                ColumnConfig::new("openJobs").with_format(ColumnFormat::Number),
                ColumnConfig::new("health").badge(vec![
                    BadgeOption::new("healthy", "Healthy", Tone::Green),
                    BadgeOption::new("attention", "Needs Attention", Tone::Amber),
                    BadgeOption::new("at_risk", "At Risk", Tone::Red),
                ]),
            ],
        )
        .titled("Account Portfolio")
        .from_source(DataSource::related("accountHealth.accounts"))
        .when_empty("No accounts assigned"),
        Section::table(
            "recent-wins",
            vec![
                ColumnConfig::new("candidateName").with_label("Candidate"),
                ColumnConfig::new("accountName").with_label("Account"),
                ColumnConfig::new("billRate").with_format(ColumnFormat::Currency),
                ColumnConfig::new("startDate").with_format(ColumnFormat::Date),
            ],
        )
        .titled("Recent Wins")
        .from_source(DataSource::related("recentWins").sorted(SortSpec::desc("startDate")))
        .when_empty("No placements this sprint yet"),
    ];

    ScreenDefinition::new(
        "recruiter-dashboard",
        ScreenKind::Dashboard,
        "My Dashboard",
        source,
        Layout::SingleColumn { sections },
    )
    .with_subtitle(Binding::context("user.fullName"))
    .with_icon("LayoutDashboard")
}

// ============================================================================
// Jobs list
// ============================================================================

pub fn jobs_list() -> ScreenDefinition {
    let source = DataSource::list("job")
        .filtered_by("status", Binding::param("status"))
        .filtered_by("search", Binding::param("search"))
        .filtered_by("jobType", Binding::param("jobType"))
        .sorted(SortSpec::desc("createdAt"))
        .with_page_size(25);

    let table = Section::table(
        "jobs",
        vec![
            ColumnConfig::new("title").with_label("Job Title").sortable(),
            ColumnConfig::new("account").with_label("Client").with_path("account.name"),
            ColumnConfig::new("status").with_format(ColumnFormat::Status),
            ColumnConfig::new("positionsAvailable")
                .with_label("Openings")
                .with_format(ColumnFormat::Number),
            ColumnConfig::new("createdAt")
                .with_label("Created")
                .with_format(ColumnFormat::Date),
        ],
    )
    .from_source(DataSource::related("items"))
    .when_empty("No jobs found");

    ScreenDefinition::new(
        "jobs-list",
        ScreenKind::List,
        "Jobs",
        source,
        Layout::SingleColumn {
            sections: vec![table],
        },
    )
    .with_subtitle(Binding::field("total"))
    .with_icon("Briefcase")
    .with_action(
        ActionDescriptor::navigate("create-job", "Create Job", "/employee/recruiting/jobs/intake")
            .with_variant(Variant::Primary)
            .with_icon("Plus"),
    )
    .with_action(
        ActionDescriptor::export("export-jobs", "Export", "job.export", ExportFormat::Csv)
            .with_input("status", Binding::param("status"))
            .with_icon("Download"),
    )
    .with_breadcrumb(Breadcrumb::new("Recruiting", Some("/employee/recruiting")))
}

// ============================================================================
// Job detail
// ============================================================================

pub fn job_detail() -> ScreenDefinition {
    let source = DataSource::entity("job")
        .including("account")
        .including("submissions")
        .including("activities");

    let sidebar = Section::info_card(
        "job-overview",
        vec![
            ColumnConfig::new("status").with_format(ColumnFormat::Status),
            ColumnConfig::new("location"),
            ColumnConfig::new("positionsAvailable")
                .with_label("Openings")
                .with_format(ColumnFormat::Number),
            ColumnConfig::new("billRate").with_format(ColumnFormat::Currency),
            ColumnConfig::new("isRemote")
                .with_label("Remote")
                .with_format(ColumnFormat::Boolean),
            ColumnConfig::new("owner").with_path("owner.fullName"),
            ColumnConfig::new("createdAt")
                .with_label("Created")
                .with_format(ColumnFormat::Date),
        ],
    )
    .titled("Overview");

    let overview = Tab::new("overview", "Overview").with_section(
        Section::info_card(
            "requirements",
            vec![
                ColumnConfig::new("description"),
                ColumnConfig::new("requiredSkills").rendered_by("tag-list"),
                ColumnConfig::new("yearsExperience")
                    .with_label("Experience")
                    .with_format(ColumnFormat::Number),
            ],
        )
        .titled("Requirements"),
    );

    let pipeline = Tab::new("pipeline", "Pipeline").with_section(
        Section::table(
            "submissions",
            vec![
                ColumnConfig::new("candidate").with_path("candidate.fullName"),
                submission_status(),
                ColumnConfig::new("submittedRate")
                    .with_label("Rate")
                    .with_format(ColumnFormat::Currency),
                ColumnConfig::new("submittedAt")
                    .with_label("Submitted")
                    .with_format(ColumnFormat::Date),
            ],
        )
        .titled("Submissions")
        .from_source(DataSource::related("submissions").sorted(SortSpec::desc("submittedAt")))
        .when_empty("No submissions yet")
        .with_action(
            ActionDescriptor::export(
                "export-submissions",
                "Export",
                "submission.export",
                ExportFormat::Csv,
            )
            .with_input("jobId", Binding::field("id")),
        ),
    );

    let activity = Tab::new("activity", "Activity").with_section(
        Section::timeline("activity-timeline", "subject", "createdAt")
            .titled("Activity")
            .from_source(DataSource::related("activities").sorted(SortSpec::desc("createdAt"))),
    );

    ScreenDefinition::new(
        "job-detail",
        ScreenKind::Detail,
        Binding::field("title"),
        source,
        Layout::SidebarMain {
            sidebar: Box::new(sidebar),
            tabs: vec![overview, pipeline, activity],
        },
    )
    .with_subtitle(Binding::field("account.name"))
    .with_icon("Briefcase")
    .with_action(
        ActionDescriptor::navigate("edit", "Edit Job", "/employee/recruiting/jobs/{{id}}/edit")
            .with_icon("Edit")
            .visible_when(Visibility::when(
                "status",
                Operator::NotIn,
                json!(["filled", "cancelled"]),
            )),
    )
    .with_action(ActionDescriptor::modal("log-activity", "Log Activity", "log-activity").with_icon("Phone"))
    .with_action(
        ActionDescriptor::mutation("close", "Close Job", "job.close")
            .with_input("id", Binding::field("id"))
            .with_input("closedBy", Binding::context("user.id"))
            .invalidates("job.getById")
            .invalidates("job.list")
            .with_success_message("Job closed")
            .with_variant(Variant::Destructive)
            .visible_when(Visibility::when(
                "status",
                Operator::NotIn,
                json!(["draft", "filled", "cancelled"]),
            ))
            .confirmed_by(
                ConfirmSpec::new("Close this job?", "Open submissions will be withdrawn.").destructive("Close Job"),
            ),
    )
    .with_breadcrumb(Breadcrumb::new("Recruiting", Some("/employee/recruiting")))
    .with_breadcrumb(Breadcrumb::new("Jobs", Some("/employee/recruiting/jobs")))
}

// ============================================================================
// Consultant detail
// ============================================================================

pub fn consultant_detail() -> ScreenDefinition {
    let source = DataSource::entity("candidate")
        .including("skills")
        .including("submissions")
        .including("immigrationHistory")
        .including("activities")
        .including("documents");

    let sidebar = Section::info_card(
        "consultant-overview",
        vec![
            ColumnConfig::new("status").with_format(ColumnFormat::Status),
            ColumnConfig::new("daysOnBench").with_format(ColumnFormat::Number),
            ColumnConfig::new("email"),
            ColumnConfig::new("phone"),
            ColumnConfig::new("location"),
            ColumnConfig::new("visaStatus").with_label("Visa"),
            ColumnConfig::new("visaExpiry").with_format(ColumnFormat::Date),
            ColumnConfig::new("rate").with_format(ColumnFormat::Currency),
            ColumnConfig::new("owner").with_path("owner.fullName"),
        ],
    )
    .titled("Overview")
    .with_action(ActionDescriptor::function("call", "Call", "initiate-call").with_variant(Variant::Ghost))
    .with_action(ActionDescriptor::modal("email", "Email", "send-email").with_variant(Variant::Ghost));

    let profile = Tab::new("profile", "Profile").with_section(
        Section::info_card(
            "professional-summary",
            vec![
                ColumnConfig::new("professionalHeadline").with_label("Headline"),
                ColumnConfig::new("summary"),
                ColumnConfig::new("yearsOfExperience")
                    .with_label("Experience")
                    .with_format(ColumnFormat::Number),
                ColumnConfig::new("relocationWilling")
                    .with_label("Willing to Relocate")
                    .with_format(ColumnFormat::Boolean),
            ],
        )
        .titled("Professional Summary"),
    );

    let immigration = Tab::new("immigration", "Immigration")
        .with_section(
            Section::custom(
                "visa-status",
                "VisaStatusCard",
                json!({ "showDaysUntilExpiry": true }),
            )
            .titled("Visa Status"),
        )
        .with_section(
            Section::custom("immigration-case", "ImmigrationCaseCard", json!({ "showTimeline": true }))
                .titled("Immigration Case")
                .visible_when(Visibility::exists("immigrationCase")),
        )
        .with_section(
            Section::timeline("immigration-history", "event", "occurredAt")
                .titled("Immigration History")
                .from_source(DataSource::related("immigrationHistory").sorted(SortSpec::desc("occurredAt"))),
        )
        .with_action(ActionDescriptor::modal("contact-hr", "Contact HR", "contact-hr"))
        .with_action(
            ActionDescriptor::function("flag-unavailable", "Flag as Unavailable", "flag-consultant-unavailable")
                .with_variant(Variant::Destructive)
                .visible_when(Visibility::when(
                    "visaAlertLevel",
                    Operator::In,
                    json!(["red", "black"]),
                )),
        );

    let submissions = Tab::new("submissions", "Submissions").with_section(
        Section::table(
            "submission-history",
            vec![
                ColumnConfig::new("vendor").with_path("vendor.name"),
                ColumnConfig::new("job").with_path("externalJob.title"),
                submission_status(),
                ColumnConfig::new("submittedRate")
                    .with_label("Rate")
                    .with_format(ColumnFormat::Currency),
                ColumnConfig::new("submittedAt")
                    .with_label("Submitted")
                    .with_format(ColumnFormat::Date),
            ],
        )
        .titled("Submission History")
        .from_source(DataSource::related("submissions").sorted(SortSpec::desc("submittedAt")))
        .when_empty("No submissions yet")
        .with_action(ActionDescriptor::modal("new-submission", "New Submission", "bench-submission-create")),
    );

    let documents = Tab::new("documents", "Documents").with_section(
        Section::table(
            "visa-docs",
            vec![
                ColumnConfig::new("fileName").with_label("Name"),
                ColumnConfig::new("documentType").with_label("Type"),
                ColumnConfig::new("expiryDate")
                    .with_label("Expiry")
                    .with_format(ColumnFormat::Date),
            ],
        )
        .titled("Visa Documents")
        .from_source(
            DataSource::related("documents")
                .where_(Condition::new(
                    "documentType",
                    Operator::In,
                    Some(json!(["visa", "ead", "i797", "passport"])),
                ))
                .sorted(SortSpec::desc("uploadedAt")),
        )
        .when_empty("No visa documents on file")
        .with_action(ActionDescriptor::modal("upload-visa-doc", "Upload Visa Doc", "upload-visa-document")),
    );

    ScreenDefinition::new(
        "consultant-detail",
        ScreenKind::Detail,
        Binding::field("fullName"),
        source,
        Layout::SidebarMain {
            sidebar: Box::new(sidebar),
            tabs: vec![profile, immigration, submissions, documents],
        },
    )
    .with_subtitle(Binding::field("title"))
    .with_icon("User")
    .with_action(
        ActionDescriptor::navigate("edit", "Edit Profile", "/employee/workspace/bench/consultants/{{id}}/edit")
            .with_icon("Edit"),
    )
    .with_action(ActionDescriptor::modal("submit", "Submit to Job", "bench-submission-create").with_variant(Variant::Primary))
    .with_action(ActionDescriptor::modal("log-activity", "Log Activity", "log-activity"))
    .with_action(
        ActionDescriptor::function("mark-placed", "Mark as Placed", "mark-consultant-placed")
            .visible_when(Visibility::when("status", Operator::Neq, "placed"))
            .confirmed_by(ConfirmSpec::new(
                "Mark as placed?",
                "The consultant will be removed from the bench.",
            )),
    )
    .with_action(
        ActionDescriptor::mutation("archive", "Archive", "candidate.archive")
            .with_input("id", Binding::field("id"))
            .invalidates("candidate.getById")
            .with_success_message("Consultant archived")
            .with_variant(Variant::Destructive)
            .confirmed_by(ConfirmSpec::new("Archive consultant?", "They will be hidden from bench lists.").destructive("Archive")),
    )
}
