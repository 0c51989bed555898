//! Regex trigger tables for the pattern strategy
//!
//! Each stance carries an ordered list of triggers; the match count feeds the
//! confidence formula. Signal triggers are separate tables, never gated by
//! the stance decision.

use lazy_static::lazy_static;
use prism_domain::Stance;
use regex::Regex;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static pattern must compile"))
        .collect()
}

lazy_static! {
    /// Precondition triggers: setup requirements, ordering prerequisites.
    pub static ref PRECONDITION_TRIGGERS: Vec<Regex> = compile(&[
        r"(?i)\bbefore (?:you|they|we|that|doing|starting|deploying|migrating)\b",
        r"(?i)\bfirst,? you (?:need|must|should|have to)\b",
        r"(?i)\b(?:requires?|requiring) (?:that|a|an|the)\b",
        r"(?i)\bprerequisites?\b",
        r"(?i)\byou(?:'ll| will)? need (?:to|a|an|the)\b",
        r"(?i)\bin order to\b",
        r"(?i)\bonly after\b",
    ]);

    /// Consequence triggers: downstream effects and results.
    pub static ref CONSEQUENCE_TRIGGERS: Vec<Regex> = compile(&[
        r"(?i)\bas a result\b",
        r"(?i)\bthis (?:will|would|can|could) (?:lead|cause|result|mean)\b",
        r"(?i)\bconsequently\b",
        r"(?i)\bwhich means\b",
        r"(?i)\bresults? in\b",
        r"(?i)\bleads? to\b",
        r"(?i)\byou(?:'ll| will)? end up\b",
    ]);

    /// Warning triggers: cautionary content.
    pub static ref WARNING_TRIGGERS: Vec<Regex> = compile(&[
        r"(?i)\bavoid\b",
        r"(?i)\bnever\b",
        r"(?i)\bdo(?:n't| not)\b",
        r"(?i)\bbe (?:careful|wary|cautious)\b",
        r"(?i)\bbeware\b",
        r"(?i)\b(?:risk|risky|dangerous|danger)\b",
        r"(?i)\b(?:pitfall|gotcha|footgun)s?\b",
        r"(?i)\bwatch out\b",
    ]);

    /// Directive triggers: recommendations and instructions.
    pub static ref DIRECTIVE_TRIGGERS: Vec<Regex> = compile(&[
        r"(?i)\byou should\b",
        r"(?i)\bshould\b",
        r"(?i)\bmust\b",
        r"(?i)\b(?:recommend|recommended|recommendation)\b",
        r"(?i)\bprefer(?:red|ably)?\b",
        r"(?i)\b(?:choose|pick|go with|opt for)\b",
        r"(?i)\bstart (?:by|with)\b",
        r"(?i)\bmake sure\b",
        r"(?i)\balways\b",
    ]);

    /// Hedged triggers: uncertain or qualified content.
    pub static ref HEDGED_TRIGGERS: Vec<Regex> = compile(&[
        r"(?i)\bmight\b",
        r"(?i)\bmay\b",
        r"(?i)\bcould\b",
        r"(?i)\b(?:possibly|perhaps|probably|likely|arguably)\b",
        r"(?i)\bit depends\b",
        r"(?i)\bin some cases\b",
        r"(?i)\bnot (?:entirely |completely )?(?:sure|certain|clear)\b",
        r"(?i)\b(?:roughly|approximately|around)\b",
    ]);

    /// Factual triggers: plain assertions. Factual is also the default when
    /// nothing matches, so this table only raises confidence.
    pub static ref FACTUAL_TRIGGERS: Vec<Regex> = compile(&[
        r"(?i)\b(?:is|are|was|were) (?:a|an|the)\b",
        r"(?i)\b(?:consists? of|defined as|stands for|refers to)\b",
        r"(?i)\b(?:supports?|provides?|includes?|contains?)\b",
    ]);

    /// Ordering-signal triggers.
    pub static ref ORDERING_TRIGGERS: Vec<Regex> = compile(&[
        r"(?i)\b(?:first|second|third|then|next|finally|lastly)\b",
        r"(?i)\bafter(?:ward)?s?\b",
        r"(?i)\bbefore\b",
        r"(?i)\bstep \d+\b",
        r"(?i)\b(?:subsequently|followed by)\b",
    ]);

    /// Tension-signal triggers.
    pub static ref TENSION_TRIGGERS: Vec<Regex> = compile(&[
        r"(?i)\bhowever\b",
        r"(?i)\bbut\b",
        r"(?i)\bon the other hand\b",
        r"(?i)\btrade-?offs?\b",
        r"(?i)\b(?:whereas|although|in contrast)\b",
        r"(?i)\b(?:versus|vs\.)\b",
        r"(?i)\b(?:conflict|disagree)\w*\b",
    ]);

    /// Conditionality-signal triggers.
    pub static ref CONDITIONALITY_TRIGGERS: Vec<Regex> = compile(&[
        r"(?i)\bif\b",
        r"(?i)\bwhen(?:ever)?\b",
        r"(?i)\bunless\b",
        r"(?i)\bprovided that\b",
        r"(?i)\bonly if\b",
        r"(?i)\bdepends? on\b",
        r"(?i)\b(?:in case|assuming|as long as)\b",
    ]);
}

/// Trigger table for a stance.
pub fn stance_triggers(stance: Stance) -> &'static [Regex] {
    match stance {
        Stance::Precondition => &PRECONDITION_TRIGGERS,
        Stance::Consequence => &CONSEQUENCE_TRIGGERS,
        Stance::Warning => &WARNING_TRIGGERS,
        Stance::Directive => &DIRECTIVE_TRIGGERS,
        Stance::Hedged => &HEDGED_TRIGGERS,
        Stance::Factual => &FACTUAL_TRIGGERS,
    }
}
