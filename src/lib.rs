#![no_std]

multiversx_sc::imports!();

pub mod types;

use types::{Proposal, ProposalState};

// ============================================================
// Constants
// ============================================================

/// Voting window: ~1 week of blocks at 12s block time
const VOTING_PERIOD_BLOCKS: u64 = 50_400;

/// Quorum: minimum turnout percentage of registered voters.
/// See `quorum_reached` for the exact arithmetic.
const QUORUM_PERCENTAGE: u64 = 30;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait ClubFundingDao {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self) {
        let deployer = self.blockchain().get_caller();
        self.authority().set(&deployer);
        self.available_funds().set(BigUint::zero());
        self.allocated_funds().set(BigUint::zero());
        self.proposal_count().set(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: fundTreasury
    // The only way value enters custody. Deposits sit in the
    // available pool until escrowed against a proposal.
    // ========================================================

    #[endpoint(fundTreasury)]
    #[payable("EGLD")]
    fn fund_treasury(&self) {
        let funder = self.blockchain().get_caller();
        let payment = self.call_value().egld_value().clone_value();
        require!(payment > 0u64, "Deposit must be greater than 0");

        self.available_funds().update(|a| *a += &payment);

        let available = self.available_funds().get();
        self.treasury_funded_event(&funder, &payment, &available);
    }

    // ========================================================
    // ENDPOINT: registerVoter / unregisterVoter
    // Authority-controlled registry. Re-registering an address
    // is a no-op and must not inflate the voter count.
    // ========================================================

    #[endpoint(registerVoter)]
    fn register_voter(&self, voter: ManagedAddress) {
        self.require_authority();

        if self.registered_voters().insert(voter.clone()) {
            self.voter_registered_event(&voter, self.registered_voters().len() as u64);
        }
    }

    #[endpoint(registerVotersBatch)]
    fn register_voters_batch(&self, voters: MultiValueEncoded<ManagedAddress>) {
        // Authority is checked once, before any insert, so an
        // unauthorized batch registers nobody.
        self.require_authority();

        for voter in voters {
            if self.registered_voters().insert(voter.clone()) {
                self.voter_registered_event(&voter, self.registered_voters().len() as u64);
            }
        }
    }

    #[endpoint(unregisterVoter)]
    fn unregister_voter(&self, voter: ManagedAddress) {
        self.require_authority();

        if self.registered_voters().swap_remove(&voter) {
            self.voter_unregistered_event(&voter, self.registered_voters().len() as u64);
        }
    }

    // ========================================================
    // ENDPOINT: createProposal
    // Any caller may submit; gating is an off-chain policy.
    // The requested amount is escrowed immediately so competing
    // proposals cannot oversubscribe the treasury.
    // ========================================================

    #[endpoint(createProposal)]
    fn create_proposal(
        &self,
        club_name: ManagedBuffer,
        title: ManagedBuffer,
        description: ManagedBuffer,
        requested_amount: BigUint,
        club_address: ManagedAddress,
    ) -> u64 {
        require!(requested_amount > 0u64, "Amount must be greater than 0");
        require!(
            requested_amount <= self.available_funds().get(),
            "Insufficient treasury funds"
        );

        self.escrow(&requested_amount);

        let proposal_id = self.proposal_count().get();
        let current_block = self.blockchain().get_block_nonce();

        let proposal = Proposal {
            id: proposal_id,
            club_name: club_name.clone(),
            title: title.clone(),
            description: description.clone(),
            requested_amount: requested_amount.clone(),
            club_address: club_address.clone(),
            created_at_block: current_block,
            voting_start_block: current_block,
            voting_end_block: current_block + VOTING_PERIOD_BLOCKS,
            yes_votes: 0,
            no_votes: 0,
            total_voters: 0,
            state: ProposalState::Active,
            funds_released: false,
        };

        self.proposals(proposal_id).set(&proposal);
        self.proposal_count().set(proposal_id + 1);

        self.proposal_created_event(
            proposal_id,
            &club_address,
            &club_name,
            &title,
            &description,
            &requested_amount,
        );

        proposal_id
    }

    // ========================================================
    // ENDPOINT: vote
    // One ballot per registered address per proposal, accepted
    // up to and including the voting end block.
    // ========================================================

    #[endpoint(vote)]
    fn vote(&self, proposal_id: u64, support: bool) {
        self.require_proposal_exists(proposal_id);

        let voter = self.blockchain().get_caller();
        require!(
            self.registered_voters().contains(&voter),
            "Not a registered voter"
        );

        let mut proposal = self.proposals(proposal_id).get();
        require!(
            proposal.state == ProposalState::Active,
            "Proposal is not active"
        );

        let current_block = self.blockchain().get_block_nonce();
        require!(
            current_block <= proposal.voting_end_block,
            "Voting period has ended"
        );

        require!(
            !self.has_voted(proposal_id, &voter).get(),
            "Already voted on this proposal"
        );

        self.has_voted(proposal_id, &voter).set(true);
        if support {
            proposal.yes_votes += 1;
        } else {
            proposal.no_votes += 1;
        }
        proposal.total_voters += 1;
        self.proposals(proposal_id).set(&proposal);

        self.vote_cast_event(
            proposal_id,
            &voter,
            support,
            proposal.yes_votes,
            proposal.no_votes,
        );
    }

    // ========================================================
    // ENDPOINT: finalizeProposal
    // One-shot transition Active -> Approved | Rejected, only
    // after the voting window has closed. Rejection returns the
    // escrowed amount to the available pool.
    // ========================================================

    #[endpoint(finalizeProposal)]
    fn finalize_proposal(&self, proposal_id: u64) {
        self.require_proposal_exists(proposal_id);

        let mut proposal = self.proposals(proposal_id).get();
        require!(
            proposal.state == ProposalState::Active,
            "Proposal already finalized"
        );

        let current_block = self.blockchain().get_block_nonce();
        require!(
            current_block > proposal.voting_end_block,
            "Voting period has not ended"
        );

        let total_registered = self.registered_voters().len() as u64;

        if !self.quorum_reached(proposal.total_voters, total_registered) {
            proposal.state = ProposalState::Rejected;
            self.proposals(proposal_id).set(&proposal);
            self.release_escrow(&proposal.requested_amount);

            self.proposal_rejected_event(
                proposal_id,
                proposal.yes_votes,
                proposal.no_votes,
                &ManagedBuffer::from(b"Quorum not met"),
            );
        } else if proposal.no_votes >= proposal.yes_votes {
            proposal.state = ProposalState::Rejected;
            self.proposals(proposal_id).set(&proposal);
            self.release_escrow(&proposal.requested_amount);

            self.proposal_rejected_event(
                proposal_id,
                proposal.yes_votes,
                proposal.no_votes,
                &ManagedBuffer::from(b"Majority voted NO"),
            );
        } else {
            // Funds stay allocated until the club withdraws.
            proposal.state = ProposalState::Approved;
            self.proposals(proposal_id).set(&proposal);

            self.proposal_approved_event(proposal_id, proposal.yes_votes, proposal.no_votes);
        }
    }

    // ========================================================
    // ENDPOINT: withdrawFunds
    // Exactly-once release of an approved proposal's escrow to
    // the club address. A second call reverts, never a no-op.
    // ========================================================

    #[endpoint(withdrawFunds)]
    fn withdraw_funds(&self, proposal_id: u64) {
        self.require_proposal_exists(proposal_id);

        let mut proposal = self.proposals(proposal_id).get();
        // Released flag is checked before the state check so a repeat
        // call on an executed proposal reports the one-shot violation.
        require!(!proposal.funds_released, "Funds already released");
        require!(
            proposal.state == ProposalState::Approved,
            "Proposal not approved"
        );

        let caller = self.blockchain().get_caller();
        require!(
            caller == proposal.club_address,
            "Only club can withdraw funds"
        );

        self.allocated_funds()
            .update(|a| *a -= &proposal.requested_amount);

        proposal.funds_released = true;
        proposal.state = ProposalState::Executed;
        self.proposals(proposal_id).set(&proposal);

        self.send()
            .direct_egld(&proposal.club_address, &proposal.requested_amount);
        self.funds_released_event(
            proposal_id,
            &proposal.club_address,
            &proposal.requested_amount,
        );
    }

    // ========================================================
    // INTERNAL: treasury escrow accounting
    // Both pools only ever move in lockstep with the contract
    // balance, preserving balance == available + allocated.
    // ========================================================

    fn escrow(&self, amount: &BigUint) {
        self.available_funds().update(|a| *a -= amount);
        self.allocated_funds().update(|a| *a += amount);
    }

    fn release_escrow(&self, amount: &BigUint) {
        self.allocated_funds().update(|a| *a -= amount);
        self.available_funds().update(|a| *a += amount);
    }

    // ========================================================
    // INTERNAL: quorum rule
    // ========================================================

    /// Turnout is reduced to a whole percentage with integer division
    /// applied BEFORE scaling: `total_voters / registered * 100`.
    /// Partial turnout truncates to zero percent, so any quorum
    /// percentage in 1..=100 requires the full registry to vote.
    /// The naive `total_voters * 100 >= quorum * registered` formula
    /// is NOT equivalent; see the quorum boundary tests.
    fn quorum_reached(&self, total_voters: u64, total_registered: u64) -> bool {
        if total_registered == 0 {
            return false;
        }
        let turnout_pct = total_voters / total_registered * 100;
        turnout_pct >= QUORUM_PERCENTAGE
    }

    // ========================================================
    // INTERNAL: guards
    // ========================================================

    fn require_authority(&self) {
        let caller = self.blockchain().get_caller();
        require!(
            caller == self.authority().get(),
            "Only admin can call this function"
        );
    }

    fn require_proposal_exists(&self, proposal_id: u64) {
        require!(
            proposal_id < self.proposal_count().get(),
            "Proposal does not exist"
        );
    }

    // ========================================================
    // VIEWS — read-only queries
    // ========================================================

    #[view(getProposal)]
    fn get_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        self.require_proposal_exists(proposal_id);
        self.proposals(proposal_id).get()
    }

    #[view(getProposals)]
    fn get_proposals(&self, from: u64, count: u64) -> MultiValueEncoded<Proposal<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        let total = self.proposal_count().get();
        if count == 0 || from >= total {
            return result;
        }
        let end = core::cmp::min(from.saturating_add(count), total);

        for id in from..end {
            result.push(self.proposals(id).get());
        }
        result
    }

    #[view(getProposalState)]
    fn get_proposal_state(&self, proposal_id: u64) -> ManagedBuffer {
        self.require_proposal_exists(proposal_id);
        let proposal = self.proposals(proposal_id).get();
        ManagedBuffer::from(proposal.state.as_bytes())
    }

    #[view(getVoteCounts)]
    fn get_vote_counts(&self, proposal_id: u64) -> MultiValue3<u64, u64, u64> {
        self.require_proposal_exists(proposal_id);
        let proposal = self.proposals(proposal_id).get();
        (proposal.yes_votes, proposal.no_votes, proposal.total_voters).into()
    }

    #[view(hasUserVoted)]
    fn has_user_voted(&self, proposal_id: u64, voter: &ManagedAddress) -> bool {
        self.has_voted(proposal_id, voter).get()
    }

    #[view(getTreasuryInfo)]
    fn get_treasury_info(&self) -> MultiValue3<BigUint, BigUint, BigUint> {
        let available = self.available_funds().get();
        let allocated = self.allocated_funds().get();
        let balance = self
            .blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0);
        (available, allocated, balance).into()
    }

    #[view(totalRegisteredVoters)]
    fn total_registered_voters(&self) -> u64 {
        self.registered_voters().len() as u64
    }

    #[view(isRegisteredVoter)]
    fn is_registered_voter(&self, voter: &ManagedAddress) -> bool {
        self.registered_voters().contains(voter)
    }

    #[view(getGovernanceParams)]
    fn get_governance_params(&self) -> MultiValue2<u64, u64> {
        (VOTING_PERIOD_BLOCKS, QUORUM_PERCENTAGE).into()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("treasuryFunded")]
    fn treasury_funded_event(
        &self,
        #[indexed] funder: &ManagedAddress,
        #[indexed] amount: &BigUint,
        new_available: &BigUint,
    );

    #[event("voterRegistered")]
    fn voter_registered_event(
        &self,
        #[indexed] voter: &ManagedAddress,
        total_registered: u64,
    );

    #[event("voterUnregistered")]
    fn voter_unregistered_event(
        &self,
        #[indexed] voter: &ManagedAddress,
        total_registered: u64,
    );

    #[event("proposalCreated")]
    fn proposal_created_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] club_address: &ManagedAddress,
        #[indexed] club_name: &ManagedBuffer,
        #[indexed] title: &ManagedBuffer,
        #[indexed] description: &ManagedBuffer,
        requested_amount: &BigUint,
    );

    #[event("voteCast")]
    fn vote_cast_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        #[indexed] support: bool,
        #[indexed] current_yes_votes: u64,
        current_no_votes: u64,
    );

    #[event("proposalApproved")]
    fn proposal_approved_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] yes_votes: u64,
        no_votes: u64,
    );

    #[event("proposalRejected")]
    fn proposal_rejected_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] yes_votes: u64,
        #[indexed] no_votes: u64,
        reason: &ManagedBuffer,
    );

    #[event("fundsReleased")]
    fn funds_released_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] club_address: &ManagedAddress,
        amount: &BigUint,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Governance configuration ──

    #[view(getAuthority)]
    #[storage_mapper("authority")]
    fn authority(&self) -> SingleValueMapper<ManagedAddress>;

    // ── Treasury ──

    #[storage_mapper("availableFunds")]
    fn available_funds(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("allocatedFunds")]
    fn allocated_funds(&self) -> SingleValueMapper<BigUint>;

    // ── Voter registry ──

    #[storage_mapper("registeredVoters")]
    fn registered_voters(&self) -> UnorderedSetMapper<ManagedAddress>;

    // ── Proposals ──

    #[view(proposalCount)]
    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, proposal_id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    #[storage_mapper("hasVoted")]
    fn has_voted(&self, proposal_id: u64, voter: &ManagedAddress) -> SingleValueMapper<bool>;
}
