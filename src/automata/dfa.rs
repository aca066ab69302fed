// src/automata/dfa.rs
//! Deterministic automaton tables and the step-wise execution state machine.

use std::{collections::BTreeSet, fmt};

use hashbrown::HashMap;

use super::state::{StateId, StateSet, Symbol};
use crate::error::DfaError;

/// Immutable-once-built transition table. Execution state lives in
/// [`DfaRun`], so any number of runs can borrow the same table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    alphabet: BTreeSet<Symbol>,
    transitions: HashMap<(StateId, Symbol), StateId>,
    initial: StateId,
    finals: StateSet,
    num_states: StateId,
}

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DfaStatus {
    /// Reset, nothing consumed.
    Start,
    /// Consumed input, current state is not accepting.
    Potential,
    /// Current state is accepting.
    Accept,
    /// The last symbol had no transition. Absorbing.
    Fail,
}

impl Dfa {
    pub fn new() -> Self {
        Self {
            alphabet: BTreeSet::new(),
            transitions: HashMap::new(),
            initial: 0,
            finals: StateSet::new(),
            num_states: 0,
        }
    }

    /// Add a new state and return its id.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    #[inline]
    fn ensure_state(&mut self, state: StateId) {
        if state >= self.num_states {
            self.num_states = state + 1;
        }
    }

    pub fn set_initial(&mut self, state: StateId) {
        self.ensure_state(state);
        self.initial = state;
    }

    pub fn add_symbol(&mut self, symbol: Symbol) {
        self.alphabet.insert(symbol);
    }

    pub fn add_final(&mut self, state: StateId) {
        self.ensure_state(state);
        self.finals.insert(state);
    }

    /// Record `src --symbol--> dst`. Re-adding an identical edge is a no-op;
    /// a second, different destination for the same `(src, symbol)` is
    /// rejected and leaves the table untouched.
    pub fn add_transition(
        &mut self,
        src: StateId,
        symbol: Symbol,
        dst: StateId,
    ) -> Result<(), DfaError> {
        if let Some(&existing) = self.transitions.get(&(src, symbol)) {
            if existing == dst {
                return Ok(());
            }
            return Err(DfaError::ConflictingTransition {
                state: src,
                symbol,
                existing,
                requested: dst,
            });
        }
        self.ensure_state(src);
        self.ensure_state(dst);
        self.alphabet.insert(symbol);
        self.transitions.insert((src, symbol), dst);
        Ok(())
    }

    /// Destination of `(state, symbol)`; `None` means the run fails there.
    #[inline]
    pub fn transition(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions.get(&(state, symbol)).copied()
    }

    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn finals(&self) -> &StateSet {
        &self.finals
    }

    #[inline]
    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// All edges as `(src, symbol, dst)`, sorted.
    pub fn transitions(&self) -> Vec<(StateId, Symbol, StateId)> {
        let mut out: Vec<_> = self
            .transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
            .collect();
        out.sort_unstable();
        out
    }

    /// True iff the language contains "".
    pub fn accepts_empty(&self) -> bool {
        self.is_final(self.initial)
    }

    /// Whole-input membership.
    pub fn accepts(&self, input: &str) -> bool {
        let mut state = self.initial;
        for c in input.chars() {
            match self.transition(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_final(state)
    }

    /// Reset-and-run; true iff an accepting state was reached at any point.
    pub fn run(&self, input: &str) -> bool {
        self.start().run(input)
    }

    /// A fresh execution over this table.
    pub fn start(&self) -> DfaRun<'_> {
        DfaRun::new(self)
    }

    /// Rebuild a table from stored parts. Conflicting edges and references to
    /// states at or above `num_states` are rejected.
    pub fn from_parts(
        num_states: StateId,
        initial: StateId,
        finals: impl IntoIterator<Item = StateId>,
        edges: impl IntoIterator<Item = (StateId, Symbol, StateId)>,
    ) -> Result<Self, DfaError> {
        let mut dfa = Self {
            alphabet: BTreeSet::new(),
            transitions: HashMap::new(),
            initial,
            finals: finals.into_iter().collect(),
            num_states,
        };
        dfa.validate()?;
        for (src, sym, dst) in edges {
            for state in [src, dst] {
                if state >= num_states {
                    return Err(DfaError::StateOutOfRange { state, num_states });
                }
            }
            dfa.add_transition(src, sym, dst)?;
        }
        Ok(dfa)
    }

    /// Checks that every referenced state is below `num_states`.
    pub fn validate(&self) -> Result<(), DfaError> {
        let n = self.num_states;
        let out_of_range = |state: StateId| DfaError::StateOutOfRange {
            state,
            num_states: n,
        };
        if self.initial >= n {
            return Err(out_of_range(self.initial));
        }
        if let Some(&f) = self.finals.iter().find(|&&f| f >= n) {
            return Err(out_of_range(f));
        }
        for (&(src, _), &dst) in &self.transitions {
            if src >= n {
                return Err(out_of_range(src));
            }
            if dst >= n {
                return Err(out_of_range(dst));
            }
        }
        Ok(())
    }
}

impl Default for Dfa {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial state: {}", self.initial)?;
        write!(f, "Final states:")?;
        for s in &self.finals {
            write!(f, " {s}")?;
        }
        writeln!(f)?;
        writeln!(f, "DFA Transitions:")?;

        let edges = self.transitions();
        let mut i = 0;
        while i < edges.len() {
            let src = edges[i].0;
            write!(f, "{src}:")?;
            while i < edges.len() && edges[i].0 == src {
                let (_, sym, dst) = edges[i];
                write!(f, "  {sym}: {dst}")?;
                i += 1;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One simulation over a borrowed [`Dfa`].
///
/// The captured accepting lexeme is sticky: stepping out of an accepting
/// state (or failing) keeps the last accepted prefix available, which is what
/// longest-match scanning relies on.
#[derive(Debug, Clone)]
pub struct DfaRun<'a> {
    dfa: &'a Dfa,
    state: StateId,
    status: DfaStatus,
    accepted: bool,
    lexeme: String,
    accepted_lexeme: String,
}

impl<'a> DfaRun<'a> {
    pub fn new(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            state: dfa.initial,
            status: DfaStatus::Start,
            accepted: false,
            lexeme: String::new(),
            accepted_lexeme: String::new(),
        }
    }

    pub fn reset(&mut self) {
        self.state = self.dfa.initial;
        self.status = DfaStatus::Start;
        self.accepted = false;
        self.lexeme.clear();
        self.accepted_lexeme.clear();
    }

    /// Consume one symbol. Once the run has failed further symbols are ignored.
    pub fn step(&mut self, c: Symbol) -> DfaStatus {
        if self.status == DfaStatus::Fail {
            return self.status;
        }
        let Some(next) = self.dfa.transition(self.state, c) else {
            self.status = DfaStatus::Fail;
            return self.status;
        };

        self.state = next;
        self.lexeme.push(c);
        if self.dfa.is_final(next) {
            self.status = DfaStatus::Accept;
            self.accepted = true;
            self.accepted_lexeme.clone_from(&self.lexeme);
        } else {
            self.status = DfaStatus::Potential;
        }
        self.status
    }

    pub fn run(&mut self, input: &str) -> bool {
        self.reset();
        for c in input.chars() {
            if self.step(c) == DfaStatus::Fail {
                break;
            }
        }
        self.accepted
    }

    pub fn status(&self) -> DfaStatus {
        self.status
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    /// Whether any step of this run reached an accepting state.
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// Everything consumed since the last reset.
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// The input consumed when an accepting state was last entered.
    pub fn accepted_lexeme(&self) -> &str {
        &self.accepted_lexeme
    }
}
