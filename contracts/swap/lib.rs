#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub use self::swap::{Error, Result, SwapProposal, SwapRegistry, SwapRegistryRef};

#[ink::contract]
mod swap {
    use ink::env::call::FromAccountId;
    use ink::storage::Mapping;
    use ledger::{Error as LedgerError, LedgerRef};

    pub type Result<T> = core::result::Result<T, Error>;

    #[derive(scale::Encode, scale::Decode, Debug, PartialEq, Eq, Clone, Copy)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        NoSuchProposal,
        ProposalPending,
        Unauthorized,
        InsufficientBalance,
        InsufficientAllowance,
        Overflow,
    }

    impl From<LedgerError> for Error {
        fn from(err: LedgerError) -> Self {
            match err {
                LedgerError::Unauthorized => Error::Unauthorized,
                LedgerError::InsufficientBalance => Error::InsufficientBalance,
                LedgerError::InsufficientAllowance => Error::InsufficientAllowance,
                LedgerError::Overflow => Error::Overflow,
            }
        }
    }

    /// A maker's standing offer: `amount_out` of `token_out` (held in escrow)
    /// for `amount_in` of `token_in`.
    #[derive(scale::Encode, scale::Decode, Debug, PartialEq, Eq, Clone, Copy)]
    #[cfg_attr(
        feature = "std",
        derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
    )]
    pub struct SwapProposal {
        pub token_out: AccountId,
        pub amount_out: Balance,
        pub token_in: AccountId,
        pub amount_in: Balance,
    }

    impl Default for SwapProposal {
        fn default() -> Self {
            Self {
                token_out: AccountId::from([0u8; 32]),
                amount_out: 0,
                token_in: AccountId::from([0u8; 32]),
                amount_in: 0,
            }
        }
    }

    impl SwapProposal {
        /// True for the all-zero value read back for makers with nothing outstanding.
        pub fn is_absent(&self) -> bool {
            *self == Self::default()
        }
    }

    #[ink(event)]
    pub struct SwapProposed {
        #[ink(topic)]
        maker_acc: AccountId,
        #[ink(topic)]
        token_out: AccountId,
        amount_out: Balance,
        #[ink(topic)]
        token_in: AccountId,
        amount_in: Balance,
    }

    #[ink(event)]
    pub struct SwapFulfilled {
        #[ink(topic)]
        maker_acc: AccountId,
        #[ink(topic)]
        taker_acc: AccountId,
        amount_out: Balance,
        amount_in: Balance,
    }

    #[ink(event)]
    pub struct SwapCancelled {
        #[ink(topic)]
        maker_acc: AccountId,
        refund_val: Balance,
    }

    #[ink(storage)]
    #[derive(Default)]
    pub struct SwapRegistry {
        /// maker_acc -> outstanding proposal (at most one)
        proposals: Mapping<AccountId, SwapProposal>,
    }

    impl SwapRegistry {
        #[ink(constructor)]
        pub fn new() -> Self {
            Self { proposals: Mapping::default() }
        }

        // -------- queries --------

        #[ink(message)]
        pub fn get_swap_proposal(&self, maker_acc: AccountId) -> SwapProposal {
            self.proposals.get(&maker_acc).unwrap_or_default()
        }

        #[ink(message)]
        pub fn has_proposal(&self, maker_acc: AccountId) -> bool {
            self.proposals.contains(&maker_acc)
        }

        // -------- proposal lifecycle --------

        /// Escrows `amount_out` of `token_out` from the caller and records the
        /// offer. The caller must have approved this contract on `token_out`
        /// beforehand. A maker may hold only one proposal at a time.
        #[ink(message)]
        pub fn create_swap_proposal(
            &mut self,
            token_out: AccountId,
            amount_out: Balance,
            token_in: AccountId,
            amount_in: Balance,
        ) -> Result<()> {
            let maker_acc = self.env().caller();
            if self.has_proposal(maker_acc) {
                return Err(Error::ProposalPending)
            }

            let registry_acc = self.env().account_id();
            Self::ledger_at(token_out).transfer_from(maker_acc, registry_acc, amount_out)?;

            let proposal = SwapProposal { token_out, amount_out, token_in, amount_in };
            self.proposals.insert(&maker_acc, &proposal);
            self.env().emit_event(SwapProposed {
                maker_acc,
                token_out,
                amount_out,
                token_in,
                amount_in,
            });
            Ok(())
        }

        /// Fulfills the maker's proposal: the caller pays `amount_in` of
        /// `token_in` to the maker and receives the escrowed `amount_out`.
        /// Any failing leg reverts the whole call.
        #[ink(message)]
        pub fn swap(&mut self, maker_acc: AccountId) -> Result<()> {
            let proposal = self.proposals.get(&maker_acc).ok_or(Error::NoSuchProposal)?;
            let taker_acc = self.env().caller();

            Self::ledger_at(proposal.token_in).transfer_from(taker_acc, maker_acc, proposal.amount_in)?;
            Self::ledger_at(proposal.token_out).transfer(taker_acc, proposal.amount_out)?;

            self.proposals.remove(&maker_acc);
            self.env().emit_event(SwapFulfilled {
                maker_acc,
                taker_acc,
                amount_out: proposal.amount_out,
                amount_in: proposal.amount_in,
            });
            Ok(())
        }

        /// Withdraws the caller's proposal and refunds the escrow.
        #[ink(message)]
        pub fn cancel_swap_proposal(&mut self) -> Result<()> {
            let maker_acc = self.env().caller();
            let proposal = self.proposals.get(&maker_acc).ok_or(Error::NoSuchProposal)?;

            Self::ledger_at(proposal.token_out).transfer(maker_acc, proposal.amount_out)?;

            self.proposals.remove(&maker_acc);
            self.env().emit_event(SwapCancelled { maker_acc, refund_val: proposal.amount_out });
            Ok(())
        }

        // ---- internals ----

        fn ledger_at(token_acc: AccountId) -> LedgerRef {
            FromAccountId::from_account_id(token_acc)
        }
    }


}
