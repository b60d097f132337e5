#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub use self::ledger::{Color, Error, Ledger, LedgerRef, Result};

#[ink::contract]
mod ledger {
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    /// Opaque per-holder tag. Unset accounts read as `0`.
    pub type Color = u32;
    pub type Result<T> = core::result::Result<T, Error>;

    #[derive(scale::Encode, scale::Decode, Debug, PartialEq, Eq, Clone, Copy)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        Unauthorized,
        InsufficientBalance,
        InsufficientAllowance,
        Overflow,
    }

    #[ink(event)]
    pub struct Transferred {
        #[ink(topic)]
        from_acc: AccountId,
        #[ink(topic)]
        to_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct Minted {
        #[ink(topic)]
        to_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct Burned {
        #[ink(topic)]
        from_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct Approved {
        #[ink(topic)]
        owner_acc: AccountId,
        #[ink(topic)]
        spender_acc: AccountId,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct MinterChanged {
        #[ink(topic)]
        old_minter: AccountId,
        #[ink(topic)]
        new_minter: AccountId,
    }

    #[ink(event)]
    pub struct ColorChanged {
        #[ink(topic)]
        holder_acc: AccountId,
        color_val: Color,
    }

    #[ink(storage)]
    pub struct Ledger {
        // metadata, fixed at deployment
        name: String,
        symbol: String,
        decimals: u8,

        // single privileged role
        minter_acc: AccountId,

        // token state
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,
        colors: Mapping<AccountId, Color>,
    }

    impl Ledger {
        // -------- constructors --------

        /// Deploys an empty ledger; the deployer becomes the minter.
        #[ink(constructor)]
        pub fn new(name: String, symbol: String, decimals: u8) -> Self {
            Self {
                name,
                symbol,
                decimals,
                minter_acc: Self::env().caller(),
                total_supply: 0,
                balances: Mapping::default(),
                allowances: Mapping::default(),
                colors: Mapping::default(),
            }
        }

        // -------- modifiers (helpers) --------

        fn only_minter(&self) -> Result<()> {
            if self.env().caller() != self.minter_acc {
                return Err(Error::Unauthorized)
            }
            Ok(())
        }

        // -------- read API --------

        #[ink(message)]
        pub fn name(&self) -> String {
            self.name.clone()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            self.symbol.clone()
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            self.decimals
        }

        #[ink(message)]
        pub fn minter(&self) -> AccountId {
            self.minter_acc
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, owner_acc: AccountId) -> Balance {
            self.balances.get(&owner_acc).unwrap_or(0)
        }

        #[ink(message)]
        pub fn my_balance(&self) -> Balance {
            let caller_acc = self.env().caller();
            self.balance_of(caller_acc)
        }

        #[ink(message)]
        pub fn color_of(&self, holder_acc: AccountId) -> Color {
            self.colors.get(&holder_acc).unwrap_or(0)
        }

        /// Balance and color in one read; unset accounts give `(0, 0)`.
        #[ink(message)]
        pub fn balance_of_with_color(&self, holder_acc: AccountId) -> (Balance, Color) {
            (self.balance_of(holder_acc), self.color_of(holder_acc))
        }

        #[ink(message)]
        pub fn allowance(&self, owner_acc: AccountId, spender_acc: AccountId) -> Balance {
            self.allowances.get(&(owner_acc, spender_acc)).unwrap_or(0)
        }

        // -------- admin / roles --------

        /// Privileged mint: only the current minter may credit new supply.
        #[ink(message)]
        pub fn mint(&mut self, to_acc: AccountId, amount_val: Balance) -> Result<()> {
            self.only_minter()?;
            self.mint_internal(to_acc, amount_val)
        }

        #[ink(message)]
        pub fn change_minter(&mut self, new_minter: AccountId) -> Result<()> {
            self.only_minter()?;
            let old_minter = self.minter_acc;
            self.minter_acc = new_minter;
            self.env().emit_event(MinterChanged { old_minter, new_minter });
            Ok(())
        }

        // -------- write API --------

        #[ink(message)]
        pub fn transfer(&mut self, to_acc: AccountId, amount_val: Balance) -> Result<()> {
            let from_acc = self.env().caller();
            self.move_balance(from_acc, to_acc, amount_val)
        }

        /// Overwrites the allowance of `spender_acc` over the caller's balance.
        #[ink(message)]
        pub fn approve(&mut self, spender_acc: AccountId, amount_val: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            self.set_allowance(owner_acc, spender_acc, amount_val);
            Ok(())
        }

        #[ink(message)]
        pub fn increase_allowance(&mut self, spender_acc: AccountId, add_val: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            let new_val = self
                .allowance(owner_acc, spender_acc)
                .checked_add(add_val)
                .ok_or(Error::Overflow)?;
            self.set_allowance(owner_acc, spender_acc, new_val);
            Ok(())
        }

        #[ink(message)]
        pub fn decrease_allowance(&mut self, spender_acc: AccountId, sub_val: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            let new_val = self.allowance(owner_acc, spender_acc).saturating_sub(sub_val);
            self.set_allowance(owner_acc, spender_acc, new_val);
            Ok(())
        }

        /// Moves `amount_val` from `from_acc` on behalf of the caller, consuming
        /// exactly that much allowance. Nothing is written unless both the
        /// allowance and the balance cover the amount.
        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount_val: Balance,
        ) -> Result<()> {
            let caller_acc = self.env().caller();
            let current_allow = self.allowance(from_acc, caller_acc);
            if current_allow < amount_val {
                return Err(Error::InsufficientAllowance)
            }

            self.move_balance(from_acc, to_acc, amount_val)?;

            let new_allow = current_allow.checked_sub(amount_val).ok_or(Error::Overflow)?;
            self.allowances.insert(&(from_acc, caller_acc), &new_allow);
            Ok(())
        }

        #[ink(message)]
        pub fn burn(&mut self, amount_val: Balance) -> Result<()> {
            let from_acc = self.env().caller();
            let from_bal = self.balance_of(from_acc);
            if from_bal < amount_val {
                return Err(Error::InsufficientBalance)
            }
            let new_from = from_bal.checked_sub(amount_val).ok_or(Error::Overflow)?;
            let new_total = self.total_supply.checked_sub(amount_val).ok_or(Error::Overflow)?;
            self.balances.insert(&from_acc, &new_from);
            self.total_supply = new_total;
            self.env().emit_event(Burned { from_acc, amount_val });
            Ok(())
        }

        /// Tags the caller with `color_val`. Free of charge; no balance is touched.
        #[ink(message)]
        pub fn set_favourite_color(&mut self, color_val: Color) -> Result<()> {
            let holder_acc = self.env().caller();
            self.colors.insert(&holder_acc, &color_val);
            self.env().emit_event(ColorChanged { holder_acc, color_val });
            Ok(())
        }

        // ---- internals ----

        fn mint_internal(&mut self, to_acc: AccountId, amount_val: Balance) -> Result<()> {
            let new_total = self.total_supply.checked_add(amount_val).ok_or(Error::Overflow)?;
            let new_to = self.balance_of(to_acc).checked_add(amount_val).ok_or(Error::Overflow)?;
            self.total_supply = new_total;
            self.balances.insert(&to_acc, &new_to);

            self.env().emit_event(Minted { to_acc, amount_val });
            Ok(())
        }

        fn move_balance(&mut self, from_acc: AccountId, to_acc: AccountId, amount_val: Balance) -> Result<()> {
            let from_bal = self.balance_of(from_acc);
            if from_bal < amount_val {
                return Err(Error::InsufficientBalance)
            }
            // self-transfer nets to zero
            if from_acc != to_acc {
                let new_from = from_bal.checked_sub(amount_val).ok_or(Error::Overflow)?;
                let new_to = self.balance_of(to_acc).checked_add(amount_val).ok_or(Error::Overflow)?;
                self.balances.insert(&from_acc, &new_from);
                self.balances.insert(&to_acc, &new_to);
            }

            self.env().emit_event(Transferred { from_acc, to_acc, amount_val });
            Ok(())
        }

        fn set_allowance(&mut self, owner_acc: AccountId, spender_acc: AccountId, amount_val: Balance) {
            self.allowances.insert(&(owner_acc, spender_acc), &amount_val);
            self.env().emit_event(Approved { owner_acc, spender_acc, amount_val });
        }
    }


}
