//! Strategy selection: a pure decision table over [`ContentAnalysis`].

use std::fmt;

use crate::transform::analysis::{ContentAnalysis, UnsupportedReason};

/// Why a candidate is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unsupported(UnsupportedReason),
    /// Only values, nothing a translator could work with.
    NoStaticText,
    /// A conditional yields markup in one of its branches.
    ElementBranch,
    /// A conditional yields values while the content also nests elements.
    DynamicBranchWithNested,
    /// The built key is empty, too short or has no letters.
    InvalidKey(String),
    /// Starts with a configured debug prefix.
    DebugText,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(reason) => write!(f, "{}", reason),
            Self::NoStaticText => write!(f, "no static text"),
            Self::ElementBranch => write!(f, "conditional branch renders an element"),
            Self::DynamicBranchWithNested => {
                write!(f, "conditional with dynamic branches around nested elements")
            }
            Self::InvalidKey(key) => write!(f, "invalid key \"{}\"", key),
            Self::DebugText => write!(f, "debug text"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformStrategy {
    Skip(SkipReason),
    SimpleCall,
    ParameterizedCall,
    TemplatedNested,
    BranchedCall,
    BranchedParameterizedCall,
    BranchedTemplated,
    MultiBranchedCall,
    MultiBranchedParameterizedCall,
    MultiBranchedTemplated,
}

impl TransformStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip(_) => "skip",
            Self::SimpleCall => "simple-call",
            Self::ParameterizedCall => "parameterized-call",
            Self::TemplatedNested => "templated-nested",
            Self::BranchedCall => "branched-call",
            Self::BranchedParameterizedCall => "branched-parameterized-call",
            Self::BranchedTemplated => "branched-templated",
            Self::MultiBranchedCall => "multi-branched-call",
            Self::MultiBranchedParameterizedCall => "multi-branched-parameterized-call",
            Self::MultiBranchedTemplated => "multi-branched-templated",
        }
    }

    /// Renders through the template component rather than a call.
    pub fn is_templated(&self) -> bool {
        matches!(
            self,
            Self::TemplatedNested | Self::BranchedTemplated | Self::MultiBranchedTemplated
        )
    }

    /// Produces a conditional chain, one template per branch combination.
    pub fn is_branched(&self) -> bool {
        matches!(
            self,
            Self::BranchedCall
                | Self::BranchedParameterizedCall
                | Self::BranchedTemplated
                | Self::MultiBranchedCall
                | Self::MultiBranchedParameterizedCall
                | Self::MultiBranchedTemplated
        )
    }
}

impl fmt::Display for TransformStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the strategy for an analyzed candidate.
///
/// Total over every analysis shape: anything not explicitly mapped is a skip.
pub fn select_strategy(analysis: &ContentAnalysis) -> TransformStrategy {
    use TransformStrategy::*;

    if let Some(reason) = &analysis.unsupported {
        return Skip(SkipReason::Unsupported(reason.clone()));
    }

    let nested = analysis.has_nested_elements();
    let variables = analysis.has_variables();

    if analysis.conditionals.is_empty() {
        return match (nested, variables, analysis.has_static_text()) {
            (true, _, _) => TemplatedNested,
            (false, _, false) => Skip(SkipReason::NoStaticText),
            (false, true, true) => ParameterizedCall,
            (false, false, true) => SimpleCall,
        };
    }

    if analysis.conditionals.iter().any(|c| c.has_element_leaves) {
        return Skip(SkipReason::ElementBranch);
    }
    if nested && !analysis.all_conditionals_fully_literal() {
        return Skip(SkipReason::DynamicBranchWithNested);
    }

    let multi = analysis.conditionals.len() > 1 || analysis.total_branch_count > 2;
    match (multi, nested, variables) {
        (false, true, _) => BranchedTemplated,
        (false, false, true) => BranchedParameterizedCall,
        (false, false, false) => BranchedCall,
        (true, true, _) => MultiBranchedTemplated,
        (true, false, true) => MultiBranchedParameterizedCall,
        (true, false, false) => MultiBranchedCall,
    }
}
