//! Reference wizard configurations

use crate::draft::{WizardConfig, WizardStep};

pub fn all() -> Vec<WizardConfig> {
    vec![job_intake(), account_intake()]
}

pub fn job_intake() -> WizardConfig {
    WizardConfig::new("job-intake", "job")
        .titled_by(&["title", "accountName"])
        .with_step(WizardStep::new("basics", "Basic Info").requiring(&["title", "accountId"]))
        .with_step(WizardStep::new("details", "Job Details").requiring(&["location", "jobType"]))
        .with_step(WizardStep::new("requirements", "Requirements").requiring(&["requiredSkills"]))
        .with_step(WizardStep::new("rates", "Rates").requiring(&["rates.billRate"]))
        .with_step(WizardStep::new("review", "Review"))
}

pub fn account_intake() -> WizardConfig {
    WizardConfig::new("account-intake", "account")
        .titled_by(&["name", "legalName"])
        .with_step(WizardStep::new("identity", "Company").requiring(&["name", "industry"]))
        .with_step(WizardStep::new("locations", "Locations").requiring(&["headquarters.city"]))
        .with_step(WizardStep::new("contacts", "Contacts").requiring(&["primaryContact.email"]))
        .with_step(WizardStep::new("billing", "Billing").requiring(&["paymentTerms"]))
        .with_step(WizardStep::new("review", "Review"))
}
