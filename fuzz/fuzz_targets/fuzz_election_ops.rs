#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ballot_election::Election;
use ballot_types::VoterAddress;

#[derive(Arbitrary, Debug)]
enum Op {
    Grant(u8, u8),
    Delegate(u8, u8),
    Vote(u8, u8),
}

fn identity(i: u8) -> VoterAddress {
    VoterAddress::new(format!("v{}", i % 16))
}

// Arbitrary operation sequences over a small identity pool must never panic,
// and every issued unit of weight must stay accounted for.
fuzz_target!(|ops: Vec<Op>| {
    let Ok(mut election) = Election::new(identity(0), ["A", "B", "C", "D"], 32) else {
        return;
    };
    let mut issued = 1u64;
    for op in &ops {
        let result = match *op {
            Op::Grant(c, t) => election.grant_voting_rights(&identity(c), &identity(t)),
            Op::Delegate(c, t) => election.delegate(&identity(c), &identity(t)),
            Op::Vote(c, p) => election.vote(&identity(c), (p % 5) as usize),
        };
        if result.is_ok() && matches!(op, Op::Grant(..)) {
            issued += 1;
        }
    }
    let unspent: u64 = election
        .voters()
        .filter(|(_, v)| !v.voted)
        .map(|(_, v)| v.weight)
        .sum();
    assert_eq!(election.total_votes() + unspent, issued);
});
