//! Ballot construction for `mun-chair tally`

use super::commands::TallyArgs;
use mun_domain::voting::rule::STANDARD_P5;
use mun_domain::{
    Ballot, BallotCounts, DelegateCode, DomainError, MajorityRuleConfig, MemberBallot,
    MemberChoice, SecurityCouncilConfig,
};

/// Parse `CODE=CHOICE` (e.g. `usa=yes`); codes are upper-cased
pub fn parse_member_choice(input: &str) -> Result<(DelegateCode, MemberChoice), String> {
    let (code, choice) = input
        .split_once('=')
        .ok_or_else(|| format!("Expected CODE=CHOICE, got '{}'", input))?;
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(format!("Missing delegate code in '{}'", input));
    }
    Ok((DelegateCode::new(code), choice.parse()?))
}

impl TallyArgs {
    /// Rule configuration and ballot described by the arguments
    ///
    /// In Security Council mode the council is seated from the `--member`
    /// flags in the order given.
    pub fn to_ballot(&self) -> Result<(MajorityRuleConfig, Ballot), DomainError> {
        let mut config = MajorityRuleConfig::new(self.mode, self.vote_type);

        if !self.mode.uses_member_ballot() {
            if !self.members.is_empty() {
                return Err(DomainError::validation(format!(
                    "--member is only used in Security Council mode, not {}",
                    self.mode
                )));
            }
            let counts = BallotCounts::from_raw(self.yes, self.no, self.abstain)?;
            return Ok((config, Ballot::Counts(counts)));
        }

        let mut ballot = MemberBallot::new();
        let mut members = Vec::new();
        for entry in &self.members {
            let (code, choice) = parse_member_choice(entry).map_err(DomainError::validation)?;
            members.push(code.clone());
            ballot.set(code, choice);
        }
        if members.is_empty() {
            return Err(DomainError::validation(
                "Security Council mode needs at least one --member CODE=CHOICE",
            ));
        }

        let permanent_members = match &self.permanent {
            Some(codes) => codes
                .iter()
                .map(|c| DelegateCode::new(c.trim().to_uppercase()))
                .collect(),
            None => STANDARD_P5.iter().map(|c| DelegateCode::from(*c)).collect(),
        };
        let mut council = SecurityCouncilConfig {
            members,
            permanent_members,
            required_yes: self.required_yes,
        };
        council.normalize();
        config = config.with_security_council(council);

        Ok((config, Ballot::Members(ballot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{Cli, Command};
    use clap::Parser;
    use mun_domain::{MajorityMode, VoteOutcome, evaluate};

    fn tally(args: &[&str]) -> TallyArgs {
        let argv = ["mun-chair", "tally"].iter().chain(args.iter());
        match Cli::try_parse_from(argv).unwrap().command {
            Some(Command::Tally(args)) => args,
            other => panic!("expected tally, got {:?}", other),
        }
    }

    // ==================== Member choices ====================

    #[test]
    fn test_parse_member_choice() {
        let (code, choice) = parse_member_choice("rus=no").unwrap();
        assert_eq!(code, DelegateCode::from("RUS"));
        assert_eq!(choice, MemberChoice::No);

        assert!(parse_member_choice("USA").is_err());
        assert!(parse_member_choice("=yes").is_err());
        assert!(parse_member_choice("USA=maybe").is_err());
    }

    // ==================== Ballots ====================

    #[test]
    fn test_counts_ballot() {
        let (config, ballot) = tally(&["--yes", "10", "--no", "3", "--abstain", "2"])
            .to_ballot()
            .unwrap();
        assert_eq!(config.mode, MajorityMode::Simple);
        assert_eq!(ballot, Ballot::Counts(BallotCounts::new(10, 3, 2)));
    }

    #[test]
    fn test_negative_count_is_rejected() {
        assert!(tally(&["--yes=-1"]).to_ballot().is_err());
    }

    #[test]
    fn test_member_flag_outside_security_council() {
        assert!(tally(&["--member", "USA=yes"]).to_ballot().is_err());
    }

    #[test]
    fn test_security_council_veto() {
        let args = tally(&[
            "--mode", "sc", "--member", "USA=yes", "--member", "RUS=no", "--member", "BRA=yes",
            "--required-yes", "2",
        ]);
        let (config, ballot) = args.to_ballot().unwrap();
        assert_eq!(
            config.security_council.permanent_members,
            vec![DelegateCode::from("USA"), DelegateCode::from("RUS")]
        );

        let verdict = evaluate(&config, &ballot).unwrap();
        assert_eq!(verdict.outcome, VoteOutcome::Failed);
        assert_eq!(verdict.vetoed_by, Some(DelegateCode::from("RUS")));
    }

    #[test]
    fn test_security_council_needs_members() {
        assert!(tally(&["--mode", "sc"]).to_ballot().is_err());
    }
}
