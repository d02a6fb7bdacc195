//! The contract facade: one method per public operation.
//!
//! Mutating operations go through [`VotingContract::submit`], which stages
//! the operation's effects in a fresh [`TxContext`] and commits the batch
//! only if the operation succeeded. Queries go through
//! [`VotingContract::evaluate`] and never commit.

use ballot_store::{LedgerStore, WriteBatch};
use ballot_types::{Election, ElectionInput, User, UserRevocation, Vote, VoteTally};

use crate::config::ContractConfig;
use crate::context::{Invocation, TxContext};
use crate::{auth, elections, revocation, tally, users, votes, ContractError};

/// The result of an operation that ran successfully but is not yet committed.
#[derive(Debug)]
pub struct Prepared<T> {
    pub output: T,
    pub batch: WriteBatch,
}

pub struct VotingContract<S> {
    store: S,
    config: ContractConfig,
}

impl<S: LedgerStore> VotingContract<S> {
    pub fn new(store: S, config: ContractConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Run `op` against current committed state without committing anything.
    pub fn prepare<T>(
        &self,
        invocation: &Invocation,
        op: impl FnOnce(&mut TxContext<'_>) -> Result<T, ContractError>,
    ) -> Result<Prepared<T>, ContractError> {
        let mut ctx = TxContext::new(&self.store, invocation);
        let output = op(&mut ctx)?;
        Ok(Prepared {
            output,
            batch: ctx.into_batch(),
        })
    }

    /// Apply a prepared batch. Fails if anything it read has since changed.
    pub fn commit<T>(&self, prepared: Prepared<T>) -> Result<T, ContractError> {
        self.store.commit(prepared.batch)?;
        Ok(prepared.output)
    }

    /// Run a mutating operation and commit its effects atomically.
    pub fn submit<T>(
        &self,
        invocation: &Invocation,
        operation: &'static str,
        op: impl FnOnce(&mut TxContext<'_>) -> Result<T, ContractError>,
    ) -> Result<T, ContractError> {
        let prepared = self.prepare(invocation, op).map_err(|e| {
            tracing::debug!(tx_id = %invocation.tx_id, operation, error = %e, "operation rejected");
            e
        })?;
        let writes = prepared.batch.writes().len();
        let events = prepared.batch.events().len();
        let output = self.commit(prepared).map_err(|e| {
            tracing::warn!(tx_id = %invocation.tx_id, operation, error = %e, "commit rejected");
            e
        })?;
        tracing::debug!(tx_id = %invocation.tx_id, operation, writes, events, "transaction committed");
        Ok(output)
    }

    /// Run a read-only operation. Nothing it stages is ever committed.
    pub fn evaluate<T>(
        &self,
        invocation: &Invocation,
        op: impl FnOnce(&mut TxContext<'_>) -> Result<T, ContractError>,
    ) -> Result<T, ContractError> {
        Ok(self.prepare(invocation, op)?.output)
    }

    // ---------------------------------------------------------------------
    // Users
    // ---------------------------------------------------------------------

    pub fn register_user(
        &self,
        inv: &Invocation,
        id: &str,
        governorate: &str,
        role: &str,
    ) -> Result<User, ContractError> {
        self.submit(inv, "RegisterUser", |ctx| {
            users::register_user(ctx, id, governorate, role)
        })
    }

    pub fn get_user(&self, inv: &Invocation, id: &str) -> Result<User, ContractError> {
        self.evaluate(inv, |ctx| users::get_user(ctx, id))
    }

    pub fn get_all_users(&self, inv: &Invocation) -> Result<Vec<User>, ContractError> {
        self.evaluate(inv, users::get_all_users)
    }

    pub fn set_user_role(&self, inv: &Invocation, id: &str, role: &str) -> Result<User, ContractError> {
        self.submit(inv, "SetUserRole", |ctx| users::set_user_role(ctx, id, role))
    }

    pub fn update_user_status(
        &self,
        inv: &Invocation,
        id: &str,
        status: &str,
        reason: &str,
    ) -> Result<User, ContractError> {
        self.submit(inv, "UpdateUserStatus", |ctx| {
            users::update_user_status(ctx, id, status, reason)
        })
    }

    pub fn is_user_admin(&self, inv: &Invocation) -> Result<bool, ContractError> {
        self.evaluate(inv, auth::is_admin)
    }

    // ---------------------------------------------------------------------
    // Elections
    // ---------------------------------------------------------------------

    pub fn create_election(
        &self,
        inv: &Invocation,
        input: ElectionInput,
    ) -> Result<Election, ContractError> {
        self.submit(inv, "CreateElection", |ctx| {
            elections::create_election(ctx, input)
        })
    }

    pub fn get_election(&self, inv: &Invocation, id: &str) -> Result<Election, ContractError> {
        self.evaluate(inv, |ctx| elections::get_election(ctx, id))
    }

    pub fn get_all_elections(&self, inv: &Invocation) -> Result<Vec<Election>, ContractError> {
        self.evaluate(inv, elections::get_all_elections)
    }

    pub fn update_election_status(
        &self,
        inv: &Invocation,
        id: &str,
        status: &str,
    ) -> Result<Election, ContractError> {
        self.submit(inv, "UpdateElectionStatus", |ctx| {
            elections::update_election_status(ctx, id, status)
        })
    }

    pub fn clear_elections(&self, inv: &Invocation) -> Result<usize, ContractError> {
        self.submit(inv, "ClearElections", elections::clear_elections)
    }

    // ---------------------------------------------------------------------
    // Votes
    // ---------------------------------------------------------------------

    pub fn cast_vote(
        &self,
        inv: &Invocation,
        vote_id: &str,
        election_id: &str,
        candidate_id: &str,
    ) -> Result<String, ContractError> {
        let config = &self.config;
        self.submit(inv, "CastVote", |ctx| {
            votes::cast_vote(ctx, config, vote_id, election_id, candidate_id)
        })
    }

    pub fn get_vote(&self, inv: &Invocation, vote_id: &str) -> Result<Vote, ContractError> {
        self.evaluate(inv, |ctx| votes::get_vote(ctx, vote_id))
    }

    pub fn get_all_votes(&self, inv: &Invocation) -> Result<Vec<Vote>, ContractError> {
        self.evaluate(inv, votes::get_all_votes)
    }

    // ---------------------------------------------------------------------
    // Tallies
    // ---------------------------------------------------------------------

    pub fn compute_vote_tally(
        &self,
        inv: &Invocation,
        tally_id: &str,
        election_id: &str,
    ) -> Result<VoteTally, ContractError> {
        self.submit(inv, "ComputeVoteTally", |ctx| {
            tally::compute_vote_tally(ctx, tally_id, election_id)
        })
    }

    pub fn compute_final_tally(
        &self,
        inv: &Invocation,
        election_id: &str,
    ) -> Result<VoteTally, ContractError> {
        self.submit(inv, "ComputeFinalTally", |ctx| {
            tally::compute_final_tally(ctx, election_id)
        })
    }

    pub fn get_vote_tally(&self, inv: &Invocation, tally_id: &str) -> Result<VoteTally, ContractError> {
        self.evaluate(inv, |ctx| tally::get_vote_tally(ctx, tally_id))
    }

    pub fn get_election_results(
        &self,
        inv: &Invocation,
        election_id: &str,
    ) -> Result<VoteTally, ContractError> {
        self.evaluate(inv, |ctx| tally::get_election_results(ctx, election_id))
    }

    // ---------------------------------------------------------------------
    // Revocations
    // ---------------------------------------------------------------------

    pub fn get_user_revocations(&self, inv: &Invocation) -> Result<Vec<UserRevocation>, ContractError> {
        self.evaluate(inv, revocation::get_user_revocations)
    }
}
