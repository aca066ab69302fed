// src/automata/nfa.rs
//! Epsilon-NFA with the Thompson composition primitives.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use hashbrown::HashMap;

use super::{
    dfa::Dfa,
    state::{EPSILON, StateId, StateSet, Symbol, is_epsilon},
    subset::subset_construction,
};

/// Nondeterministic automaton with epsilon edges.
///
/// State ids are handed out by [`Nfa::fresh_state`] and are always below
/// [`Nfa::num_states`], which makes the issued count the renumbering offset
/// when another automaton is merged in.
#[derive(Debug, Clone)]
pub struct Nfa {
    alphabet: BTreeSet<Symbol>,
    // state -> symbol -> destinations
    transitions: HashMap<StateId, BTreeMap<Symbol, StateSet>>,
    initial: StateId,
    finals: StateSet,
    num_states: StateId,
}

impl Nfa {
    /// An automaton with no states yet. Callers set the initial and final
    /// states once they have allocated them.
    pub fn new() -> Self {
        Self {
            alphabet: BTreeSet::new(),
            transitions: HashMap::new(),
            initial: 0,
            finals: StateSet::new(),
            num_states: 0,
        }
    }

    /// One state that is both initial and final: accepts only "".
    pub fn empty_string() -> Self {
        let mut nfa = Self::new();
        let s = nfa.fresh_state();
        nfa.set_initial(s);
        nfa.set_final(s);
        nfa
    }

    /// `initial --c--> final`.
    pub fn literal(c: Symbol) -> Self {
        let mut nfa = Self::new();
        let initial = nfa.fresh_state();
        let fin = nfa.fresh_state();
        nfa.add_transition(initial, c, fin);
        nfa.set_initial(initial);
        nfa.set_final(fin);
        nfa
    }

    #[inline]
    fn ensure_state(&mut self, state: StateId) {
        if state >= self.num_states {
            self.num_states = state + 1;
        }
    }

    /// Allocate a state id no other state in this automaton uses.
    pub fn fresh_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    /// Add `src --symbol--> dst`. An existing (src, symbol) entry gains `dst`
    /// as an extra destination.
    pub fn add_transition(&mut self, src: StateId, symbol: Symbol, dst: StateId) {
        self.ensure_state(src);
        self.ensure_state(dst);
        if !is_epsilon(symbol) {
            self.alphabet.insert(symbol);
        }
        self.transitions
            .entry(src)
            .or_default()
            .entry(symbol)
            .or_default()
            .insert(dst);
    }

    pub fn add_epsilon(&mut self, src: StateId, dst: StateId) {
        self.add_transition(src, EPSILON, dst);
    }

    pub fn set_initial(&mut self, state: StateId) {
        self.ensure_state(state);
        self.initial = state;
    }

    /// Make `state` the only final state.
    pub fn set_final(&mut self, state: StateId) {
        self.ensure_state(state);
        self.finals.clear();
        self.finals.insert(state);
    }

    pub fn add_final(&mut self, state: StateId) {
        self.ensure_state(state);
        self.finals.insert(state);
    }

    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn finals(&self) -> &StateSet {
        &self.finals
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    /// Input symbols, epsilon excluded, in ascending order.
    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// Number of ids issued so far (max id + 1).
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Destinations of `(state, symbol)`, if any edge exists.
    pub fn transition(&self, state: StateId, symbol: Symbol) -> Option<&StateSet> {
        self.transitions.get(&state)?.get(&symbol)
    }

    /// All edges as `(src, symbol, dst)`, sorted.
    pub fn transitions(&self) -> Vec<(StateId, Symbol, StateId)> {
        let mut out: Vec<_> = self
            .transitions
            .iter()
            .flat_map(|(&src, row)| {
                row.iter()
                    .flat_map(move |(&sym, dsts)| dsts.iter().map(move |&dst| (src, sym, dst)))
            })
            .collect();
        out.sort_unstable();
        out
    }

    /// Renumber every state of `other` by this automaton's issued count and
    /// merge its edges and alphabet in. Returns the offset applied; the caller
    /// decides how `other`'s initial and final states are wired.
    pub fn absorb(&mut self, other: &Nfa) -> StateId {
        let offset = self.num_states;
        for (&src, row) in &other.transitions {
            for (&sym, dsts) in row {
                for &dst in dsts {
                    self.add_transition(src + offset, sym, dst + offset);
                }
            }
        }
        self.alphabet.extend(other.alphabet.iter().copied());
        self.num_states = offset + other.num_states;
        offset
    }

    /// `self . other`: every final of `self` gets an epsilon edge to the
    /// renumbered initial of `other`, whose finals become the result's.
    pub fn concat(&mut self, other: &Nfa) {
        let offset = self.absorb(other);
        let next = other.initial + offset;
        let finals = std::mem::take(&mut self.finals);
        for f in finals {
            self.add_epsilon(f, next);
        }
        self.finals = other.finals.iter().map(|&f| f + offset).collect();
    }

    /// `self | other` with a new initial and a new final state.
    pub fn union(&mut self, other: &Nfa) {
        let new_initial = self.fresh_state();
        let new_final = self.fresh_state();
        let old_initial = self.initial;
        let offset = self.absorb(other);

        self.add_epsilon(new_initial, old_initial);
        self.add_epsilon(new_initial, other.initial + offset);

        let finals = std::mem::take(&mut self.finals);
        for f in finals {
            self.add_epsilon(f, new_final);
        }
        for &f in &other.finals {
            self.add_epsilon(f + offset, new_final);
        }

        self.initial = new_initial;
        self.set_final(new_final);
    }

    /// `self*` with a new initial and a new final state.
    pub fn kleene(&mut self) {
        let new_initial = self.fresh_state();
        let new_final = self.fresh_state();
        let old_initial = self.initial;

        self.add_epsilon(new_initial, old_initial);
        self.add_epsilon(new_initial, new_final);

        let finals = std::mem::take(&mut self.finals);
        for f in finals {
            self.add_epsilon(f, old_initial);
            self.add_epsilon(f, new_final);
        }

        self.initial = new_initial;
        self.set_final(new_final);
    }

    /// Smallest superset of `states` closed under epsilon edges.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(s) = stack.pop() {
            if let Some(dsts) = self.transition(s, EPSILON) {
                for &d in dsts {
                    if closure.insert(d) {
                        stack.push(d);
                    }
                }
            }
        }

        closure
    }

    /// States reachable from `states` by one `symbol` edge (no closure).
    pub fn move_on(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        let mut reached = StateSet::new();
        for &s in states {
            if let Some(dsts) = self.transition(s, symbol) {
                reached.extend(dsts.iter().copied());
            }
        }
        reached
    }

    /// Direct simulation over the whole input.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = self.epsilon_closure(&StateSet::from([self.initial]));
        for c in input.chars() {
            if current.is_empty() {
                return false;
            }
            current = self.epsilon_closure(&self.move_on(&current, c));
        }
        current.iter().any(|s| self.finals.contains(s))
    }

    pub fn to_dfa(&self) -> Dfa {
        subset_construction(self)
    }
}

impl Default for Nfa {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial state: {}", self.initial)?;
        write!(f, "Final states:")?;
        for s in &self.finals {
            write!(f, " {s}")?;
        }
        writeln!(f)?;
        writeln!(f, "Transitions:")?;

        let mut srcs: Vec<_> = self.transitions.keys().copied().collect();
        srcs.sort_unstable();
        for src in srcs {
            for (&sym, dsts) in &self.transitions[&src] {
                let label = if is_epsilon(sym) { 'ε' } else { sym };
                write!(f, "{src} --{label}-->")?;
                for d in dsts {
                    write!(f, " {d}")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_transition_unions_destinations() {
        let mut nfa = Nfa::new();
        nfa.add_transition(0, 'a', 1);
        nfa.add_transition(0, 'a', 2);
        assert_eq!(nfa.transition(0, 'a'), Some(&StateSet::from([1, 2])));
        assert_eq!(nfa.num_states(), 3);
        assert!(nfa.transition(0, 'b').is_none());
        // lookup must not create entries
        assert!(nfa.transition(7, 'a').is_none());
        assert_eq!(nfa.num_states(), 3);
    }

    #[test]
    fn epsilon_stays_out_of_alphabet() {
        let mut nfa = Nfa::new();
        nfa.add_epsilon(0, 1);
        nfa.add_transition(1, 'b', 2);
        assert_eq!(nfa.alphabet().iter().copied().collect::<Vec<_>>(), vec!['b']);
    }

    #[test]
    fn epsilon_closure_follows_chains_and_cycles() {
        let mut nfa = Nfa::new();
        nfa.add_epsilon(0, 1);
        nfa.add_epsilon(1, 2);
        nfa.add_epsilon(2, 0);
        nfa.add_transition(2, 'a', 3);
        nfa.add_epsilon(3, 4);

        let closure = nfa.epsilon_closure(&StateSet::from([0]));
        assert_eq!(closure, StateSet::from([0, 1, 2]));
        // restartable: same answer, automaton untouched
        assert_eq!(nfa.epsilon_closure(&StateSet::from([0])), closure);
        assert_eq!(
            nfa.epsilon_closure(&StateSet::from([3])),
            StateSet::from([3, 4])
        );
        assert!(nfa.epsilon_closure(&StateSet::new()).is_empty());
    }

    #[test]
    fn move_on_does_not_close() {
        let mut nfa = Nfa::new();
        nfa.add_transition(0, 'a', 1);
        nfa.add_transition(0, 'a', 2);
        nfa.add_epsilon(1, 3);
        assert_eq!(
            nfa.move_on(&StateSet::from([0]), 'a'),
            StateSet::from([1, 2])
        );
    }

    #[test]
    fn absorb_renumbers_past_issued_ids() {
        let mut a = Nfa::literal('a');
        let b = Nfa::literal('b');
        let offset = a.absorb(&b);
        assert_eq!(offset, 2);
        assert_eq!(a.num_states(), 4);
        assert_eq!(a.transition(2, 'b'), Some(&StateSet::from([3])));
        assert_eq!(a.transition(0, 'a'), Some(&StateSet::from([1])));
    }

    #[test]
    fn concat_links_final_to_next_initial() {
        let mut a = Nfa::literal('a');
        a.concat(&Nfa::literal('b'));
        assert_eq!(a.initial(), 0);
        assert_eq!(a.finals(), &StateSet::from([3]));
        assert_eq!(a.transition(1, EPSILON), Some(&StateSet::from([2])));
        assert!(a.accepts("ab"));
        assert!(!a.accepts("a"));
        assert!(!a.accepts("ba"));
    }

    #[test]
    fn union_allocates_fresh_endpoints() {
        let mut a = Nfa::literal('a');
        a.union(&Nfa::literal('b'));
        // a: 0,1  new endpoints: 2,3  b: 4,5
        assert_eq!(a.initial(), 2);
        assert_eq!(a.finals(), &StateSet::from([3]));
        assert_eq!(a.transition(2, EPSILON), Some(&StateSet::from([0, 4])));
        assert_eq!(a.transition(4, 'b'), Some(&StateSet::from([5])));
        assert!(a.transition(3, EPSILON).is_none());
        assert!(a.accepts("a"));
        assert!(a.accepts("b"));
        assert!(!a.accepts("ab"));
        assert!(!a.accepts(""));
    }

    #[test]
    fn kleene_accepts_repetitions() {
        let mut a = Nfa::literal('a');
        a.kleene();
        assert_eq!(a.initial(), 2);
        assert_eq!(a.finals(), &StateSet::from([3]));
        for s in ["", "a", "aa", "aaaa"] {
            assert!(a.accepts(s), "{s:?}");
        }
        assert!(!a.accepts("b"));
    }

    #[test]
    fn empty_string_fragment() {
        let nfa = Nfa::empty_string();
        assert!(nfa.accepts(""));
        assert!(!nfa.accepts("a"));
        assert_eq!(nfa.num_states(), 1);
    }
}
