//! Reference entity journeys

use crate::journey::{EntityJourney, JourneyStep, QuickAction};

pub fn all() -> Vec<EntityJourney> {
    vec![job(), candidate(), account(), contact(), placement(), deal()]
}

pub fn job() -> EntityJourney {
    EntityJourney::new("job")
        .with_step(
            JourneyStep::new("info", "Job Info")
                .described("Job requirements and details")
                .active_for(&["draft"])
                .completed_for(&["open", "active", "on_hold", "filled", "cancelled"])
                .with_default_tab("overview"),
        )
        .with_step(
            JourneyStep::new("sourcing", "Sourcing")
                .described("Finding candidates")
                .active_for(&["open"])
                .completed_for(&["active", "on_hold", "filled"])
                .with_default_tab("pipeline"),
        )
        .with_step(
            JourneyStep::new("pipeline", "Pipeline")
                .described("Managing submissions")
                .active_for(&["active"])
                .completed_for(&["filled"])
                .with_default_tab("pipeline"),
        )
        .with_step(
            JourneyStep::new("interviews", "Interviews")
                .described("Client interviews")
                .active_for(&["active"])
                .completed_for(&["filled"])
                .with_default_tab("pipeline"),
        )
        .with_step(
            JourneyStep::new("offers", "Offers")
                .described("Offer management")
                .active_for(&["active"])
                .completed_for(&["filled"])
                .with_default_tab("pipeline"),
        )
        .with_step(
            JourneyStep::new("placement", "Placement")
                .described("Confirmed placements")
                .active_for(&["filled"])
                .with_default_tab("overview"),
        )
        .with_quick_action(
            QuickAction::navigate("edit", "Edit Job", "/employee/recruiting/jobs/new?edit=:id")
                .with_icon("Edit")
                .hide_for(&["filled", "cancelled"]),
        )
        .with_quick_action(
            QuickAction::navigate(
                "add-submission",
                "+ Add Submission",
                "/employee/recruiting/jobs/:id/submissions/new",
            )
            .with_icon("Send")
            .hide_for(&["draft", "filled", "cancelled", "on_hold"]),
        )
        .with_quick_action(
            QuickAction::navigate("add-candidate", "+ Add Candidate", "/employee/recruiting/jobs/:id/add-candidate")
                .with_icon("UserPlus")
                .hide_for(&["draft", "filled", "cancelled"]),
        )
        .with_quick_action(QuickAction::dialog("activity", "Log Activity", "logActivity").with_icon("Phone"))
        .with_quick_action(
            QuickAction::dialog("hold", "Put on Hold", "updateStatus")
                .with_icon("PauseCircle")
                .show_for(&["open", "active"]),
        )
        .with_quick_action(
            QuickAction::dialog("resume", "Resume Job", "updateStatus")
                .with_icon("PlayCircle")
                .show_for(&["on_hold"]),
        )
        .with_quick_action(
            QuickAction::dialog("close", "Close Job", "closeJob")
                .with_icon("XCircle")
                .destructive()
                .hide_for(&["draft", "filled", "cancelled"]),
        )
}

pub fn candidate() -> EntityJourney {
    EntityJourney::new("candidate")
        .with_step(
            JourneyStep::new("profile", "Profile")
                .described("Candidate information")
                .active_for(&["sourced", "new"])
                .completed_for(&["screening", "bench", "active", "placed"]),
        )
        .with_step(
            JourneyStep::new("screening", "Screening")
                .described("Initial assessment")
                .active_for(&["screening"])
                .completed_for(&["bench", "active", "placed"]),
        )
        .with_step(
            JourneyStep::new("submissions", "Submissions")
                .described("Job submissions")
                .active_for(&["bench", "active"])
                .completed_for(&["placed"]),
        )
        .with_step(
            JourneyStep::new("placed", "Placed")
                .described("Active placement")
                .active_for(&["placed"]),
        )
        .with_quick_action(QuickAction::navigate(
            "edit",
            "Edit Candidate",
            "/employee/recruiting/candidates/:id/edit",
        ))
        .with_quick_action(
            QuickAction::dialog("submit", "Submit to Job", "submitToJob").hide_for(&["placed", "inactive", "archived"]),
        )
        .with_quick_action(QuickAction::dialog("note", "Add Note", "addNote"))
        .with_quick_action(QuickAction::dialog("call", "Schedule Call", "scheduleCall"))
        .with_quick_action(QuickAction::dialog("upload-resume", "Upload Resume", "uploadResume"))
        .with_quick_action(
            QuickAction::dialog("screen", "Start Screening", "startScreening").show_for(&["sourced", "new"]),
        )
        .with_quick_action(
            QuickAction::mutation("hotlist", "Add to Hotlist", "candidate.addToHotlist")
                .hide_for(&["inactive", "archived"]),
        )
        .with_quick_action(
            QuickAction::dialog("mark-inactive", "Mark Inactive", "markInactive")
                .destructive()
                .hide_for(&["inactive", "archived", "placed"]),
        )
}

pub fn account() -> EntityJourney {
    EntityJourney::new("account")
        .with_step(
            JourneyStep::new("profile", "Profile")
                .described("Company information")
                .active_for(&["prospect"])
                .completed_for(&["active"]),
        )
        .with_step(JourneyStep::new("contacts", "Contacts").active_for(&["prospect", "active"]))
        .with_step(JourneyStep::new("contracts", "Contracts").active_for(&["active"]))
        .with_step(JourneyStep::new("jobs", "Jobs").active_for(&["active"]))
        .with_step(JourneyStep::new("placements", "Placements").active_for(&["active"]))
        .with_quick_action(QuickAction::navigate(
            "edit",
            "Edit Account",
            "/employee/recruiting/accounts/new?edit=:id",
        ))
        .with_quick_action(QuickAction::dialog("contact", "Add Contact", "addContact"))
        .with_quick_action(QuickAction::dialog("link-contact", "Link Contact", "linkContact"))
        .with_quick_action(QuickAction::dialog("job", "New Job", "jobIntake"))
        .with_quick_action(QuickAction::dialog("activity", "Log Activity", "logActivity"))
}

pub fn contact() -> EntityJourney {
    EntityJourney::new("contact")
        .with_step(JourneyStep::new("profile", "Profile").active_for(&["active"]))
        .with_quick_action(QuickAction::navigate("edit", "Edit Contact", "/employee/contacts/:id/edit"))
        .with_quick_action(QuickAction::navigate("email", "Send Email", "mailto::email"))
        .with_quick_action(QuickAction::navigate("call", "Call", "tel::phone"))
        .with_quick_action(QuickAction::dialog("add-note", "Add Note", "addNote"))
        .with_quick_action(QuickAction::dialog("schedule-meeting", "Schedule Meeting", "scheduleMeeting"))
        .with_quick_action(QuickAction::dialog("add-to-campaign", "Add to Campaign", "addToCampaign"))
        .with_quick_action(QuickAction::mutation(
            "convert-to-candidate",
            "Convert to Candidate",
            "contact.convertToCandidate",
        ))
}

pub fn placement() -> EntityJourney {
    EntityJourney::new("placement")
        .with_step(
            JourneyStep::new("pending", "Pending Start")
                .active_for(&["pending_start"])
                .completed_for(&["active", "extended", "ended"]),
        )
        .with_step(
            JourneyStep::new("active", "Active")
                .active_for(&["active"])
                .completed_for(&["extended", "ended"]),
        )
        .with_step(
            JourneyStep::new("extended", "Extended")
                .active_for(&["extended"])
                .completed_for(&["ended"]),
        )
        .with_step(JourneyStep::new("ended", "Ended").active_for(&["ended"]))
        .with_quick_action(
            QuickAction::dialog("extend", "Extend Placement", "extendPlacement").show_for(&["active", "extended"]),
        )
        .with_quick_action(
            QuickAction::dialog("checkin", "Check-in", "placementCheckin").show_for(&["active", "extended"]),
        )
        .with_quick_action(
            QuickAction::dialog("end", "End Placement", "endPlacement")
                .destructive()
                .show_for(&["active", "extended"]),
        )
}

pub fn deal() -> EntityJourney {
    EntityJourney::new("deal")
        .with_step(
            JourneyStep::new("discovery", "Discovery")
                .active_for(&["discovery"])
                .completed_for(&["qualification", "proposal", "negotiation", "verbal_commit", "closed_won"]),
        )
        .with_step(
            JourneyStep::new("qualification", "Qualification")
                .active_for(&["qualification"])
                .completed_for(&["proposal", "negotiation", "verbal_commit", "closed_won"]),
        )
        .with_step(
            JourneyStep::new("proposal", "Proposal")
                .active_for(&["proposal"])
                .completed_for(&["negotiation", "verbal_commit", "closed_won"]),
        )
        .with_step(
            JourneyStep::new("negotiation", "Negotiation")
                .active_for(&["negotiation"])
                .completed_for(&["verbal_commit", "closed_won"]),
        )
        .with_step(
            JourneyStep::new("verbal_commit", "Verbal Commit")
                .active_for(&["verbal_commit"])
                .completed_for(&["closed_won"]),
        )
        .with_step(JourneyStep::new("closed", "Closed").active_for(&["closed_won", "closed_lost"]))
        .with_quick_action(
            QuickAction::navigate("edit", "Edit Deal", "/employee/crm/deals/:id/edit")
                .hide_for(&["closed_won", "closed_lost"]),
        )
        .with_quick_action(
            QuickAction::dialog("advance-stage", "Advance Stage", "advanceStage")
                .hide_for(&["closed_won", "closed_lost", "verbal_commit"]),
        )
        .with_quick_action(QuickAction::dialog("add-stakeholder", "Add Stakeholder", "addStakeholder"))
        .with_quick_action(QuickAction::dialog("add-note", "Add Note", "addNote"))
        .with_quick_action(
            QuickAction::dialog("mark-won", "Mark Won", "closeDealWon")
                .show_for(&["proposal", "negotiation", "verbal_commit"]),
        )
        .with_quick_action(
            QuickAction::dialog("mark-lost", "Mark Lost", "closeDealLost")
                .destructive()
                .hide_for(&["closed_won", "closed_lost"]),
        )
}
