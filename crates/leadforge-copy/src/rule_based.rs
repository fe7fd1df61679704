//! Deterministic rule-based generator: three fixed angles, no I/O.

use tracing::debug;

use crate::context::{build_context, GenerationContext};
use crate::packs::{build_facebook_pack, build_google_pack, cta_line, proof_line, AngleCopy};
use crate::types::{AdOption, Channel, GenerationRequest};

/// Upper bound on options returned by any generator.
pub const MAX_OPTIONS: usize = 3;

struct Blueprint {
    label: &'static str,
    hook: String,
    short_hook: String,
    headline: String,
    description: &'static str,
}

fn blueprints(context: &GenerationContext) -> [Blueprint; 3] {
    [
        Blueprint {
            label: "Outcome Angle",
            hook: format!("Get {} without long setup cycles", context.offer),
            short_hook: format!("Get {}", context.offer),
            headline: format!("Get {}", context.offer),
            description: "Outcome-focused angle for prospects ready to act.",
        },
        Blueprint {
            label: "Pain To Solution",
            hook: format!(
                "Stop wasting budget on low intent traffic and shift into {}-driven campaigns",
                context.keyword_one
            ),
            short_hook: "Stop budget waste".to_string(),
            headline: format!("Cut waste, grow {}", context.keyword_one),
            description: "Pain-first framing that calls out current inefficiency.",
        },
        Blueprint {
            label: "Proof Angle",
            hook: "Use proven collateral and customer proof to increase trust before the click"
                .to_string(),
            short_hook: "Lead with proof".to_string(),
            headline: format!("Proof-led {} system", context.objective),
            description: "Social proof framing using customer collateral.",
        },
    ]
}

/// Attach the packs for each requested channel to `option`.
pub fn attach_packs(option: &mut AdOption, context: &GenerationContext, channels: &[Channel]) {
    let angle = AngleCopy::from(&*option);
    option.facebook = channels
        .contains(&Channel::Facebook)
        .then(|| build_facebook_pack(&angle, context));
    option.google = channels
        .contains(&Channel::Google)
        .then(|| build_google_pack(&angle, context));
}

/// Render the fixed angles for an already-built context.
pub fn rule_based_options(context: &GenerationContext, channels: &[Channel]) -> Vec<AdOption> {
    blueprints(context)
        .into_iter()
        .take(MAX_OPTIONS)
        .enumerate()
        .map(|(index, angle)| {
            let mut option = AdOption {
                id: format!("rule-{}", index + 1),
                label: angle.label.to_string(),
                rationale: format!(
                    "{} Focus keywords: {}, {}, {}.",
                    angle.description, context.keyword_one, context.keyword_two, context.keyword_three
                ),
                hook: angle.hook,
                short_hook: angle.short_hook,
                headline: angle.headline,
                description: angle.description.to_string(),
                proof_line: proof_line(context),
                cta_line: cta_line(context),
                facebook: None,
                google: None,
            };
            attach_packs(&mut option, context, channels);
            option
        })
        .collect()
}

/// Generate options for a request without any external call.
pub fn generate_rule_based(request: &GenerationRequest) -> Vec<AdOption> {
    let context = build_context(request);
    let options = rule_based_options(&context, &request.channels);
    debug!(
        "Rule-based generation: {} options for {}",
        options.len(),
        context.customer_name
    );
    options
}
