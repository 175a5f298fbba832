//! In-memory ledger that stands in for a validator running the greeter program.
//!
//! It executes two kinds of instructions:
//! - system `CreateAccountWithSeed`, with the same address check the runtime does
//! - the greeter program's greet, which increments the stored `u32`
//!
//! Every transaction is signature-checked and applied atomically.

#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use greeter_client::{GreeterConnection, GreeterError, GreeterResult, GreetingAccountState, KeyMaterial};
use parking_lot::Mutex;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::system_instruction::SystemInstruction;
use solana_sdk::system_program;
use solana_sdk::transaction::Transaction;

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<Pubkey, Account>,
    creations: usize,
    greets: usize,
    fail_next_send: Option<String>,
    offline: bool,
}

pub struct MockLedger {
    program_id: Pubkey,
    state: Mutex<LedgerState>,
}

impl MockLedger {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id, state: Mutex::new(LedgerState::default()) }
    }

    pub fn creations(&self) -> usize {
        self.state.lock().creations
    }

    pub fn greets(&self) -> usize {
        self.state.lock().greets
    }

    pub fn account(&self, pubkey: &Pubkey) -> Option<Account> {
        self.state.lock().accounts.get(pubkey).cloned()
    }

    pub fn insert_account(&self, pubkey: Pubkey, owner: Pubkey, data: Vec<u8>) {
        let account = Account { lamports: 1_000_000, data, owner, executable: false, rent_epoch: 0 };
        self.state.lock().accounts.insert(pubkey, account);
    }

    pub fn fail_next_send(&self, reason: &str) {
        self.state.lock().fail_next_send = Some(reason.to_string());
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.lock().offline = offline;
    }

    pub fn rent_for(size: usize) -> u64 {
        (128 + size as u64) * 3_480 * 2
    }

    fn execute(&self, state: &mut LedgerState, tx: &Transaction) -> GreeterResult<()> {
        let keys = &tx.message.account_keys;
        let mut accounts = state.accounts.clone();
        let mut creations = 0;
        let mut greets = 0;

        for ix in &tx.message.instructions {
            let program = keys[ix.program_id_index as usize];
            if program == system_program::id() {
                let decoded: SystemInstruction = bincode::deserialize(&ix.data)
                    .map_err(|e| GreeterError::submission(format!("invalid system instruction: {e}")))?;
                let SystemInstruction::CreateAccountWithSeed { base, seed, lamports, space, owner } = decoded else {
                    return Err(GreeterError::submission("unsupported system instruction"));
                };
                let to = keys[ix.accounts[1] as usize];
                let expected = Pubkey::create_with_seed(&base, &seed, &owner)
                    .map_err(|e| GreeterError::submission(e.to_string()))?;
                if expected != to {
                    return Err(GreeterError::submission("create with seed address mismatch"));
                }
                if accounts.contains_key(&to) {
                    return Err(GreeterError::submission("account already in use"));
                }
                accounts.insert(
                    to,
                    Account { lamports, data: vec![0; space as usize], owner, executable: false, rent_epoch: 0 },
                );
                creations += 1;
            } else if program == self.program_id {
                let target = keys[ix.accounts[0] as usize];
                let account = accounts
                    .get_mut(&target)
                    .ok_or_else(|| GreeterError::submission("greeted account does not exist"))?;
                if account.owner != self.program_id {
                    return Err(GreeterError::submission("greeted account does not have the correct program id"));
                }
                let mut greeting = greeter_client::decode(Some(&account.data))
                    .map_err(|e| GreeterError::submission(e.to_string()))?;
                greeting = GreetingAccountState::new(greeting.counter + 1);
                account.data = greeting.encode();
                greets += 1;
            } else {
                return Err(GreeterError::submission(format!("unknown program {program}")));
            }
        }

        state.accounts = accounts;
        state.creations += creations;
        state.greets += greets;
        Ok(())
    }
}

#[async_trait]
impl GreeterConnection for MockLedger {
    async fn get_account(&self, pubkey: &Pubkey) -> GreeterResult<Option<Account>> {
        let state = self.state.lock();
        if state.offline {
            return Err(GreeterError::network("connection refused"));
        }
        Ok(state.accounts.get(pubkey).cloned())
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> GreeterResult<u64> {
        if self.state.lock().offline {
            return Err(GreeterError::network("connection refused"));
        }
        Ok(Self::rent_for(data_len))
    }

    async fn get_latest_blockhash(&self) -> GreeterResult<Hash> {
        if self.state.lock().offline {
            return Err(GreeterError::network("connection refused"));
        }
        Ok(Hash::new_unique())
    }

    async fn send_and_confirm_transaction(&self, tx: &Transaction) -> GreeterResult<Signature> {
        let mut state = self.state.lock();
        if let Some(reason) = state.fail_next_send.take() {
            return Err(GreeterError::submission(reason));
        }
        tx.verify().map_err(|e| GreeterError::submission(e.to_string()))?;
        self.execute(&mut state, tx)?;
        Ok(tx.signatures[0])
    }
}

pub fn key_material() -> (KeyMaterial, Pubkey, Pubkey) {
    let payer = Keypair::new();
    let program = Keypair::new();
    let payer_pk = solana_sdk::signer::Signer::pubkey(&payer);
    let program_pk = solana_sdk::signer::Signer::pubkey(&program);
    (KeyMaterial::from_keypairs(payer, program), payer_pk, program_pk)
}
