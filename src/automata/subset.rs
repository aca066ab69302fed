// src/automata/subset.rs
//! Subset (powerset) construction: epsilon-NFA to DFA.

use indexmap::IndexSet;

use super::{
    dfa::Dfa,
    nfa::Nfa,
    state::{StateId, StateSet},
};

/// Convert `nfa` into an equivalent DFA.
///
/// Each distinct NFA subset is a DFA state whose id is its index in the
/// discovery set. Subsets are processed in that same order, symbols in
/// ascending order, so the same NFA always yields the same numbering. A
/// symbol whose move set is empty gets no edge; failure is the absence of a
/// transition.
pub fn subset_construction(nfa: &Nfa) -> Dfa {
    // discovery order doubles as the FIFO worklist: index == DFA id
    let mut subsets: IndexSet<StateSet> = IndexSet::new();
    let mut dfa = Dfa::new();
    for &symbol in nfa.alphabet() {
        dfa.add_symbol(symbol);
    }

    let start = nfa.epsilon_closure(&StateSet::from([nfa.initial()]));
    let start_id = new_state(&mut dfa, nfa, &start);
    dfa.set_initial(start_id);
    subsets.insert(start);

    let mut unmarked = 0;
    while let Some(current) = subsets.get_index(unmarked).cloned() {
        let current_id = unmarked as StateId;
        unmarked += 1;

        for &symbol in nfa.alphabet() {
            let next = nfa.epsilon_closure(&nfa.move_on(&current, symbol));
            if next.is_empty() {
                continue;
            }

            let next_id = match subsets.get_index_of(&next) {
                Some(index) => index as StateId,
                None => {
                    let id = new_state(&mut dfa, nfa, &next);
                    let (index, _) = subsets.insert_full(next);
                    debug_assert_eq!(index as StateId, id);
                    id
                }
            };

            dfa.add_transition(current_id, symbol, next_id)
                .expect("each (state, symbol) pair is visited exactly once");
        }
    }

    log::debug!(
        "[subset] {} NFA states -> {} DFA states, {} edges",
        nfa.num_states(),
        dfa.num_states(),
        dfa.transitions().len()
    );
    dfa
}

fn new_state(dfa: &mut Dfa, nfa: &Nfa, subset: &StateSet) -> StateId {
    let id = dfa.add_state();
    if intersects_finals(nfa, subset) {
        dfa.add_final(id);
    }
    id
}

#[inline]
fn intersects_finals(nfa: &Nfa, set: &StateSet) -> bool {
    set.iter().any(|&s| nfa.is_final(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_nondeterministic_branches() {
        // 0 -a-> 1, 0 -a-> 2, 1 -b-> 3, 2 -b-> 3 (final)
        let mut nfa = Nfa::new();
        nfa.add_transition(0, 'a', 1);
        nfa.add_transition(0, 'a', 2);
        nfa.add_transition(1, 'b', 3);
        nfa.add_transition(2, 'b', 3);
        nfa.set_initial(0);
        nfa.set_final(3);

        let dfa = subset_construction(&nfa);
        assert_eq!(dfa.num_states(), 3);
        assert_eq!(dfa.transitions(), vec![(0, 'a', 1), (1, 'b', 2)]);
        assert_eq!(dfa.finals(), &StateSet::from([2]));
        assert!(dfa.accepts("ab"));
        assert!(!dfa.accepts("a"));
    }

    #[test]
    fn initial_state_is_epsilon_closure() {
        // 0 -ε-> 1 (final)
        let mut nfa = Nfa::new();
        nfa.add_epsilon(0, 1);
        nfa.add_transition(1, 'a', 2);
        nfa.set_initial(0);
        nfa.set_final(1);

        let dfa = subset_construction(&nfa);
        assert!(dfa.accepts_empty());
        assert!(!dfa.accepts("a"));
    }

    #[test]
    fn revisited_subset_keeps_its_id() {
        // 0 -a-> 1, 1 -a-> 1 (final): {1} is reached twice
        let mut nfa = Nfa::new();
        nfa.add_transition(0, 'a', 1);
        nfa.add_transition(1, 'a', 1);
        nfa.set_initial(0);
        nfa.set_final(1);

        let dfa = subset_construction(&nfa);
        assert_eq!(dfa.num_states(), 2);
        assert_eq!(dfa.transitions(), vec![(0, 'a', 1), (1, 'a', 1)]);
        assert_eq!(dfa.finals(), &StateSet::from([1]));
    }

    #[test]
    fn ids_follow_discovery_order() {
        // symbols enumerate in ascending order even if added out of order
        let mut nfa = Nfa::new();
        nfa.add_transition(0, 'c', 1);
        nfa.add_transition(0, 'a', 2);
        nfa.add_transition(0, 'b', 3);
        nfa.set_initial(0);
        nfa.add_final(1);
        nfa.add_final(2);
        nfa.add_final(3);

        let dfa = subset_construction(&nfa);
        assert_eq!(
            dfa.transitions(),
            vec![(0, 'a', 1), (0, 'b', 2), (0, 'c', 3)]
        );
    }

    #[test]
    fn no_edge_for_empty_move() {
        let nfa = Nfa::literal('a');
        let dfa = subset_construction(&nfa);
        assert_eq!(dfa.num_states(), 2);
        assert_eq!(dfa.transition(1, 'a'), None);
        assert_eq!(dfa.alphabet().len(), 1);
    }
}
