use proptest::prelude::*;

use ballot_election::Election;
use ballot_types::VoterAddress;

const POOL: usize = 6;
const PROPOSALS: usize = 3;

#[derive(Clone, Debug)]
enum Op {
    Grant(usize, usize),
    Delegate(usize, usize),
    Vote(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..POOL, 0..POOL).prop_map(|(c, t)| Op::Grant(c, t)),
        (0..POOL, 0..POOL).prop_map(|(c, t)| Op::Delegate(c, t)),
        // one past the end to exercise InvalidProposal
        (0..POOL, 0..=PROPOSALS).prop_map(|(c, p)| Op::Vote(c, p)),
    ]
}

/// Identity 0 is the administrator.
fn identity(i: usize) -> VoterAddress {
    VoterAddress::new(format!("voter{i}"))
}

fn fresh() -> Election {
    Election::new(identity(0), ["P1", "P2", "P3"], 32).unwrap()
}

fn apply(e: &mut Election, op: &Op) -> bool {
    match *op {
        Op::Grant(c, t) => e.grant_voting_rights(&identity(c), &identity(t)).is_ok(),
        Op::Delegate(c, t) => e.delegate(&identity(c), &identity(t)).is_ok(),
        Op::Vote(c, p) => e.vote(&identity(c), p).is_ok(),
    }
}

proptest! {
    /// Every issued unit of weight is either still held by a voter who has
    /// not voted or sits in exactly one proposal count.
    #[test]
    fn weight_is_conserved(ops in prop::collection::vec(op(), 0..64)) {
        let mut e = fresh();
        let mut issued = 1u64;
        for op in &ops {
            if apply(&mut e, op) && matches!(op, Op::Grant(..)) {
                issued += 1;
            }
            let unspent: u64 = e.voters().filter(|(_, v)| !v.voted).map(|(_, v)| v.weight).sum();
            prop_assert_eq!(e.total_votes() + unspent, issued);
        }
    }

    /// Each proposal's count equals the weight of its direct voters.
    #[test]
    fn counts_match_direct_voters(ops in prop::collection::vec(op(), 0..64)) {
        let mut e = fresh();
        for op in &ops {
            apply(&mut e, op);
        }
        for index in 0..PROPOSALS {
            let direct: u64 = e
                .voters()
                .filter(|(_, v)| v.voted_proposal() == Some(index))
                .map(|(_, v)| v.weight)
                .sum();
            prop_assert_eq!(e.proposal(index).unwrap().vote_count, direct);
        }
    }

    /// Rejected calls leave the encoded state byte-for-byte unchanged.
    #[test]
    fn rejections_do_not_mutate(ops in prop::collection::vec(op(), 0..64)) {
        let mut e = fresh();
        for op in &ops {
            let before = e.save_state().unwrap();
            if !apply(&mut e, op) {
                prop_assert_eq!(e.save_state().unwrap(), before);
            }
        }
    }

    /// Counts never decrease and a voted flag is never cleared.
    #[test]
    fn counts_and_voted_are_monotonic(ops in prop::collection::vec(op(), 0..64)) {
        let mut e = fresh();
        for op in &ops {
            let tally = e.tally();
            let voted: Vec<bool> = (0..POOL).map(|i| e.voter(&identity(i)).voted).collect();
            apply(&mut e, op);
            for (before, after) in tally.iter().zip(e.tally()) {
                prop_assert!(after >= *before);
            }
            for (i, was_voted) in voted.iter().enumerate() {
                if *was_voted {
                    prop_assert!(e.voter(&identity(i)).voted);
                }
            }
        }
    }

    /// The winner is the first index holding the maximum count.
    #[test]
    fn winner_is_first_maximum(ops in prop::collection::vec(op(), 0..64)) {
        let mut e = fresh();
        for op in &ops {
            apply(&mut e, op);
        }
        let tally = e.tally();
        let max = tally.iter().copied().max().unwrap_or(0);
        let expected = tally.iter().position(|&c| c == max).unwrap_or(0);
        prop_assert_eq!(e.winning_proposal(), expected);
        prop_assert_eq!(e.winner_name(), &e.proposal(expected).unwrap().name);
    }

    /// No voter's recorded delegate is ever the voter itself.
    #[test]
    fn no_voter_delegates_to_itself(ops in prop::collection::vec(op(), 0..64)) {
        let mut e = fresh();
        for op in &ops {
            apply(&mut e, op);
        }
        for (address, voter) in e.voters() {
            prop_assert_ne!(voter.delegate.as_ref(), Some(address));
        }
    }
}
