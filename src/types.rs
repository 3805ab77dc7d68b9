multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Proposal State — lifecycle states
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum ProposalState {
    /// Voting window is open. Registered voters can vote yes/no.
    Active,
    /// Quorum reached and yes > no. Funds stay escrowed until the
    /// club withdraws. Only exit is to Executed.
    Approved,
    /// Quorum missed, or no >= yes. Escrow returned to the treasury.
    /// Terminal state.
    Rejected,
    /// Funds sent to the club address. Terminal state.
    Executed,
}

impl ProposalState {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            ProposalState::Active => b"ACTIVE",
            ProposalState::Approved => b"APPROVED",
            ProposalState::Rejected => b"REJECTED",
            ProposalState::Executed => b"EXECUTED",
        }
    }
}

// ============================================================
// Proposal — the core governance record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    pub club_name: ManagedBuffer<M>,
    pub title: ManagedBuffer<M>,
    pub description: ManagedBuffer<M>,
    pub requested_amount: BigUint<M>,
    pub club_address: ManagedAddress<M>,
    pub created_at_block: u64,
    pub voting_start_block: u64,
    /// Last block at which a vote is still accepted.
    pub voting_end_block: u64,
    pub yes_votes: u64,
    pub no_votes: u64,
    pub total_voters: u64,
    pub state: ProposalState,
    pub funds_released: bool,
}
