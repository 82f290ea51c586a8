// Copyright 2026 The Reword Project
// SPDX-License-Identifier: Apache-2.0

// Model selection
//
// Maps the two user-facing model tiers to the provider-side model id sent
// in the completion request body.

use std::fmt;
use std::str::FromStr;

/// User-facing model tier.
///
/// `Mini` is the quality tier, `Nano` the fast tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    Mini,
    Nano,
}

impl Model {
    /// Resolve the provider-side model identifier.
    ///
    /// Both tiers currently resolve to the same upstream id.
    /// TODO: point Nano at a lighter upstream model once one is provisioned.
    pub fn provider_id(&self) -> &'static str {
        match self {
            Model::Mini => "gpt-4o-mini",
            Model::Nano => "gpt-4o-mini",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Model::Mini => "mini",
            Model::Nano => "nano",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown model \"{0}\"")]
pub struct ParseModelError(String);

impl FromStr for Model {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mini" => Ok(Model::Mini),
            "nano" => Ok(Model::Nano),
            other => Err(ParseModelError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_resolution() {
        // Current behavior: both tiers share one upstream id.
        assert_eq!(Model::Mini.provider_id(), "gpt-4o-mini");
        assert_eq!(Model::Nano.provider_id(), "gpt-4o-mini");
    }

    #[test]
    fn display_from_str_round_trip() {
        for model in [Model::Mini, Model::Nano] {
            let parsed: Model = model.to_string().parse().unwrap();
            assert_eq!(parsed, model);
        }
        assert!("turbo".parse::<Model>().is_err());
    }
}
