#![no_main]

use libfuzzer_sys::fuzz_target;

use ballot_election::Election;

// Decoding arbitrary bytes must either fail cleanly or yield an election
// whose queries and delegation walks terminate.
fuzz_target!(|data: &[u8]| {
    if let Ok(mut election) = Election::load_state(data) {
        let _ = election.winning_proposal();
        let _ = election.winner_name();
        let voters: Vec<_> = election.voters().map(|(a, _)| a.clone()).collect();
        for (i, from) in voters.iter().enumerate() {
            let to = &voters[(i + 1) % voters.len()];
            let _ = election.delegate(from, to);
        }
    }
});
