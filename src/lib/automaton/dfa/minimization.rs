use hashbrown::HashMap;
use itertools::Itertools;

use crate::automaton::{Alphabet, Automaton, dfa::DFA, graph::StateId, symbol::Symbol};

/// A partition of the states of a DFA into blocks of (so far) equivalent
/// states. Within a block, states keep ascending id order, so the first
/// member is always the one with the lowest id.
#[derive(Debug, Clone)]
struct Partition {
    blocks: Vec<Vec<StateId>>,
    block_of: Vec<usize>,
}

impl Partition {
    fn from_blocks(blocks: Vec<Vec<StateId>>, state_count: usize) -> Self {
        let mut block_of = vec![0; state_count];

        for (index, block) in blocks.iter().enumerate() {
            for state in block {
                block_of[state.index()] = index;
            }
        }

        Partition { blocks, block_of }
    }

    /// Final states in one block, non-final states in the other. Empty
    /// blocks are left out.
    fn initial(dfa: &DFA) -> Self {
        let (finals, non_finals): (Vec<_>, Vec<_>) =
            dfa.iter_states().partition(|&state| dfa.is_accepting(state));

        let blocks = [finals, non_finals]
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect_vec();

        Partition::from_blocks(blocks, dfa.state_count())
    }

    fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// The block of the successor for every alphabet symbol, [None] if the
    /// transition is missing.
    fn signature(&self, dfa: &DFA, state: StateId, alphabet: &[char]) -> Vec<Option<usize>> {
        alphabet
            .iter()
            .map(|&symbol| {
                dfa.next_state(state, symbol)
                    .map(|target| self.block_of[target.index()])
            })
            .collect_vec()
    }

    /// Splits every block into groups of states with equal signatures. The
    /// groups of a block are ordered by the first state that produced them.
    fn refine(&self, dfa: &DFA, alphabet: &[char]) -> Partition {
        let mut blocks: Vec<Vec<StateId>> = vec![];

        for block in &self.blocks {
            let mut groups: HashMap<Vec<Option<usize>>, usize> = HashMap::new();

            for &state in block {
                let signature = self.signature(dfa, state, alphabet);

                let index = *groups.entry(signature).or_insert_with(|| {
                    blocks.push(vec![]);
                    blocks.len() - 1
                });

                blocks[index].push(state);
            }
        }

        Partition::from_blocks(blocks, self.block_of.len())
    }

    /// Builds the quotient automaton, one state per block named after the
    /// block's first member.
    fn to_dfa(&self, dfa: &DFA, alphabet: &[char]) -> DFA {
        let mut result = DFA::new();
        for &symbol in alphabet {
            result.add_symbol_to_alphabet(symbol);
        }

        let block_states = self
            .blocks
            .iter()
            .map(|block| result.core.add_state(dfa.state(block[0]).clone()))
            .collect_vec();

        for (block, &from) in self.blocks.iter().zip(&block_states) {
            let representative = block[0];

            for &symbol in alphabet {
                if let Some(target) = dfa.next_state(representative, symbol) {
                    let to = block_states[self.block_of[target.index()]];
                    result
                        .core
                        .push_transition(from, Symbol::Letter(symbol), to);
                }
            }
        }

        if let Some(start) = dfa.get_start() {
            result.set_start(Some(block_states[self.block_of[start.index()]]));
        }

        result
    }
}

impl DFA {
    /// Minimizes the DFA with Moore's partition refinement.
    ///
    /// Starting from the split into final and non-final states, blocks are
    /// split by the blocks their transitions lead to until a pass produces no
    /// new block. Missing transitions count as a distinct target, so the DFA
    /// does not need to be complete.
    pub fn minimize(&self) -> DFA {
        let alphabet = self.alphabet().iter().copied().collect_vec();

        let mut partition = Partition::initial(self);
        let mut pass = 0;

        loop {
            pass += 1;
            let refined = partition.refine(self, &alphabet);

            tracing::debug!(
                "minimization pass {}: {} -> {} blocks",
                pass,
                partition.block_count(),
                refined.block_count()
            );

            if refined.block_count() == partition.block_count() {
                break;
            }

            partition = refined;
        }

        partition.to_dfa(self, &alphabet)
    }
}
