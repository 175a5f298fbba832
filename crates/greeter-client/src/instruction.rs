//! Instruction builders for the greeter program.

use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_sdk::system_instruction;

/// Build the greet instruction.
///
/// The greeter program has a single instruction, so the payload is empty and
/// the state change is driven by the one writable account it references.
pub fn build_greet(program_id: &Pubkey, greeting_account: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::new(*greeting_account, false)],
        data: Vec::new(),
    }
}

/// Parameters for funding and allocating the greeting account.
#[derive(Debug, Clone)]
pub struct CreateGreetingAccountArgs<'a> {
    pub payer: Pubkey,
    pub new_account: Pubkey,
    pub seed: &'a str,
    pub lamports: u64,
    pub space: usize,
    pub owner: Pubkey,
}

/// Build a system `create_account_with_seed` instruction.
///
/// The payer funds the account and is also the derivation base.
pub fn build_create_greeting_account(args: &CreateGreetingAccountArgs<'_>) -> Instruction {
    system_instruction::create_account_with_seed(
        &args.payer,
        &args.new_account,
        &args.payer,
        args.seed,
        args.lamports,
        args.space as u64,
        &args.owner,
    )
}
