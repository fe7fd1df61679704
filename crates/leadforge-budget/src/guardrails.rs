//! Campaign risk scoring and the stage pipeline.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fraction of a cap above which a campaign is flagged as medium risk.
const WARN_RATIO: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Guardrails {
    pub budget_cap: f64,
    pub cpa_cap: f64,
    pub policy_gate: bool,
    pub creative_gate: bool,
    pub kill_switch: bool,
}

impl Default for Guardrails {
    fn default() -> Self {
        Self {
            budget_cap: 2_500.0,
            cpa_cap: 120.0,
            policy_gate: true,
            creative_gate: true,
            kill_switch: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    Intake,
    #[serde(rename = "Creative QA")]
    CreativeQa,
    Launch,
    Optimization,
    Scale,
    Blocked,
}

impl Stage {
    /// Stages in which a campaign is spending.
    pub fn is_active(&self) -> bool {
        matches!(self, Stage::Launch | Stage::Optimization | Stage::Scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CampaignMode {
    Manual,
    #[default]
    Hybrid,
    Autopilot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub daily_budget: f64,
    #[serde(default)]
    pub target_cpa: f64,
    #[serde(default)]
    pub mode: CampaignMode,
    #[serde(default)]
    pub stage: Stage,
    #[serde(default = "default_risk")]
    pub risk: RiskLevel,
}

fn default_risk() -> RiskLevel {
    RiskLevel::Low
}

/// Score spend against the caps. Over a cap is high, over 80% is medium.
pub fn risk_level(daily_budget: f64, target_cpa: f64, guardrails: &Guardrails) -> RiskLevel {
    if daily_budget > guardrails.budget_cap || target_cpa > guardrails.cpa_cap {
        RiskLevel::High
    } else if daily_budget > guardrails.budget_cap * WARN_RATIO
        || target_cpa > guardrails.cpa_cap * WARN_RATIO
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Next stage in the pipeline. Blocked campaigns return to Creative QA;
/// Scale is terminal.
pub fn advance_stage(stage: Stage) -> Stage {
    match stage {
        Stage::Blocked => Stage::CreativeQa,
        Stage::Intake => Stage::CreativeQa,
        Stage::CreativeQa => Stage::Launch,
        Stage::Launch => Stage::Optimization,
        Stage::Optimization | Stage::Scale => Stage::Scale,
    }
}

/// Re-score a running campaign and block it when the kill switch trips.
///
/// Returns true if the campaign was moved to Blocked.
pub fn enforce_guardrails(campaign: &mut Campaign, guardrails: &Guardrails) -> bool {
    campaign.risk = risk_level(campaign.daily_budget, campaign.target_cpa, guardrails);
    let block =
        guardrails.kill_switch && campaign.risk == RiskLevel::High && campaign.stage.is_active();
    if block {
        debug!("Kill switch blocked campaign {}", campaign.name);
        campaign.stage = Stage::Blocked;
    }
    block
}

/// Score a new campaign and pick its starting stage.
///
/// High risk with the kill switch on starts Blocked. Autopilot campaigns
/// skip straight to Launch when the creative gate is off.
pub fn admit_campaign(campaign: &mut Campaign, guardrails: &Guardrails) {
    campaign.risk = risk_level(campaign.daily_budget, campaign.target_cpa, guardrails);
    campaign.stage = if campaign.risk == RiskLevel::High && guardrails.kill_switch {
        Stage::Blocked
    } else if campaign.mode == CampaignMode::Autopilot && !guardrails.creative_gate {
        Stage::Launch
    } else {
        Stage::Intake
    };
}

/// Operator actions on a single campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignAction {
    /// Re-score and apply the kill switch.
    #[default]
    Check,
    /// Score a new campaign and choose its first stage.
    Admit,
    /// Move one stage forward and re-score.
    Advance,
    /// Park the campaign in Blocked.
    Block,
    /// Hand the campaign to autopilot, pulling it out of Intake.
    Autopilot,
    /// Remove the campaign.
    Archive,
}

/// Apply `action` to `campaign`. Returns `None` when it was archived.
///
/// Operator actions other than check and admit leave the kill switch to
/// the next check or cycle; they only refresh the risk score.
pub fn apply_action(
    mut campaign: Campaign,
    action: CampaignAction,
    guardrails: &Guardrails,
) -> Option<Campaign> {
    match action {
        CampaignAction::Check => {
            enforce_guardrails(&mut campaign, guardrails);
            return Some(campaign);
        }
        CampaignAction::Admit => {
            admit_campaign(&mut campaign, guardrails);
            return Some(campaign);
        }
        CampaignAction::Advance => campaign.stage = advance_stage(campaign.stage),
        CampaignAction::Block => campaign.stage = Stage::Blocked,
        CampaignAction::Autopilot => {
            campaign.mode = CampaignMode::Autopilot;
            if campaign.stage == Stage::Intake {
                campaign.stage = Stage::CreativeQa;
            }
        }
        CampaignAction::Archive => {
            debug!("Archived campaign {}", campaign.name);
            return None;
        }
    }
    campaign.risk = risk_level(campaign.daily_budget, campaign.target_cpa, guardrails);
    Some(campaign)
}

/// Counts from one simulation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CycleReport {
    pub progressed: usize,
    pub blocked: usize,
}

impl CycleReport {
    pub fn message(&self) -> String {
        format!(
            "Cycle complete: {} advanced, {} blocked by guardrails.",
            self.progressed, self.blocked
        )
    }
}

/// Run one pipeline cycle over every campaign.
///
/// Blocked campaigns return to Creative QA only once the kill switch is
/// off and do not count as progressed. Every other campaign advances one
/// stage and then has its guardrails enforced.
pub fn simulate_cycle(campaigns: &mut [Campaign], guardrails: &Guardrails) -> CycleReport {
    let mut report = CycleReport::default();
    for campaign in campaigns.iter_mut() {
        if campaign.stage == Stage::Blocked {
            if !guardrails.kill_switch {
                campaign.stage = Stage::CreativeQa;
            }
            continue;
        }
        campaign.stage = advance_stage(campaign.stage);
        report.progressed += 1;
        if enforce_guardrails(campaign, guardrails) {
            report.blocked += 1;
        }
    }
    debug!("{}", report.message());
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(daily_budget: f64, target_cpa: f64, stage: Stage) -> Campaign {
        Campaign {
            name: "Spring push".into(),
            daily_budget,
            target_cpa,
            mode: CampaignMode::Hybrid,
            stage,
            risk: RiskLevel::Low,
        }
    }

    #[test]
    fn test_risk_levels() {
        let g = Guardrails::default();
        assert_eq!(risk_level(1_000.0, 50.0, &g), RiskLevel::Low);
        assert_eq!(risk_level(2_000.0, 50.0, &g), RiskLevel::Low);
        assert_eq!(risk_level(2_001.0, 50.0, &g), RiskLevel::Medium);
        assert_eq!(risk_level(100.0, 97.0, &g), RiskLevel::Medium);
        assert_eq!(risk_level(2_600.0, 10.0, &g), RiskLevel::High);
        assert_eq!(risk_level(10.0, 121.0, &g), RiskLevel::High);
    }

    #[test]
    fn test_stage_pipeline() {
        let mut stage = Stage::Intake;
        let mut seen = vec![stage];
        for _ in 0..5 {
            stage = advance_stage(stage);
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![
                Stage::Intake,
                Stage::CreativeQa,
                Stage::Launch,
                Stage::Optimization,
                Stage::Scale,
                Stage::Scale,
            ]
        );
        assert_eq!(advance_stage(Stage::Blocked), Stage::CreativeQa);
    }

    #[test]
    fn test_stage_wire_names() {
        assert_eq!(serde_json::to_value(Stage::CreativeQa).unwrap(), "Creative QA");
        let parsed: Stage = serde_json::from_value(serde_json::json!("Optimization")).unwrap();
        assert_eq!(parsed, Stage::Optimization);
    }

    #[test]
    fn test_kill_switch_blocks_active_high_risk() {
        let g = Guardrails::default();
        let mut running = campaign(3_000.0, 80.0, Stage::Optimization);
        assert!(enforce_guardrails(&mut running, &g));
        assert_eq!(running.stage, Stage::Blocked);
        assert_eq!(running.risk, RiskLevel::High);

        let mut drafting = campaign(3_000.0, 80.0, Stage::CreativeQa);
        assert!(!enforce_guardrails(&mut drafting, &g));
        assert_eq!(drafting.stage, Stage::CreativeQa);

        let off = Guardrails {
            kill_switch: false,
            ..Guardrails::default()
        };
        let mut running = campaign(3_000.0, 80.0, Stage::Launch);
        assert!(!enforce_guardrails(&mut running, &off));
        assert_eq!(running.stage, Stage::Launch);
    }

    #[test]
    fn test_advance_rescores_without_blocking() {
        let g = Guardrails::default();
        let risky = campaign(3_000.0, 80.0, Stage::CreativeQa);
        let moved = apply_action(risky, CampaignAction::Advance, &g).unwrap();
        assert_eq!(moved.stage, Stage::Launch);
        assert_eq!(moved.risk, RiskLevel::High);
    }

    #[test]
    fn test_block_autopilot_and_archive() {
        let g = Guardrails::default();
        let blocked = apply_action(campaign(100.0, 10.0, Stage::Scale), CampaignAction::Block, &g).unwrap();
        assert_eq!(blocked.stage, Stage::Blocked);
        assert_eq!(blocked.risk, RiskLevel::Low);

        let auto =
            apply_action(campaign(100.0, 10.0, Stage::Intake), CampaignAction::Autopilot, &g).unwrap();
        assert_eq!(auto.mode, CampaignMode::Autopilot);
        assert_eq!(auto.stage, Stage::CreativeQa);

        let running =
            apply_action(campaign(100.0, 10.0, Stage::Launch), CampaignAction::Autopilot, &g).unwrap();
        assert_eq!(running.stage, Stage::Launch);

        assert!(apply_action(campaign(100.0, 10.0, Stage::Launch), CampaignAction::Archive, &g).is_none());
    }

    #[test]
    fn test_action_wire_names() {
        let parsed: CampaignAction = serde_json::from_value(serde_json::json!("autopilot")).unwrap();
        assert_eq!(parsed, CampaignAction::Autopilot);
        assert_eq!(CampaignAction::default(), CampaignAction::Check);
    }

    #[test]
    fn test_simulate_cycle() {
        let g = Guardrails::default();
        let mut campaigns = vec![
            campaign(100.0, 10.0, Stage::Intake),
            campaign(3_000.0, 10.0, Stage::CreativeQa),
            campaign(100.0, 10.0, Stage::Blocked),
            campaign(100.0, 10.0, Stage::Scale),
        ];
        let report = simulate_cycle(&mut campaigns, &g);
        assert_eq!(report, CycleReport { progressed: 3, blocked: 1 });
        assert_eq!(report.message(), "Cycle complete: 3 advanced, 1 blocked by guardrails.");
        let stages: Vec<Stage> = campaigns.iter().map(|c| c.stage).collect();
        assert_eq!(
            stages,
            vec![Stage::CreativeQa, Stage::Blocked, Stage::Blocked, Stage::Scale]
        );

        let off = Guardrails {
            kill_switch: false,
            ..Guardrails::default()
        };
        let report = simulate_cycle(&mut campaigns, &off);
        assert_eq!(report.progressed, 2);
        assert_eq!(report.blocked, 0);
        assert_eq!(campaigns[1].stage, Stage::CreativeQa);
        assert_eq!(campaigns[2].stage, Stage::CreativeQa);
    }

    #[test]
    fn test_admit_campaign() {
        let g = Guardrails::default();
        let mut risky = campaign(5_000.0, 10.0, Stage::Scale);
        admit_campaign(&mut risky, &g);
        assert_eq!(risky.stage, Stage::Blocked);

        let mut auto = campaign(100.0, 10.0, Stage::Intake);
        auto.mode = CampaignMode::Autopilot;
        admit_campaign(&mut auto, &g);
        assert_eq!(auto.stage, Stage::Intake);

        let no_gate = Guardrails {
            creative_gate: false,
            ..Guardrails::default()
        };
        admit_campaign(&mut auto, &no_gate);
        assert_eq!(auto.stage, Stage::Launch);
    }
}
