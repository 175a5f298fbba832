//! Transaction assembly and submission.

use solana_program::instruction::Instruction;
use solana_sdk::packet::PACKET_DATA_SIZE;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;

use crate::connection::GreeterConnection;
use crate::error::{GreeterError, GreeterResult};

/// Sign `instructions` with `signers` and submit them as one transaction.
///
/// The first signer pays fees. Instruction order is preserved. Blocks until
/// the connection reports the transaction confirmed; no retries are made, a
/// retry must call this again so a fresh blockhash is used.
pub async fn submit(
    connection: &impl GreeterConnection,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> GreeterResult<Signature> {
    let payer = signers
        .first()
        .ok_or_else(|| GreeterError::submission("at least one signer is required"))?;
    if instructions.is_empty() {
        return Err(GreeterError::submission("transaction has no instructions"));
    }

    let blockhash = connection.get_latest_blockhash().await?;
    let tx = build_signed_transaction(instructions, signers, &payer.pubkey(), blockhash)?;

    tracing::debug!(
        instructions = instructions.len(),
        signers = signers.len(),
        "submitting transaction"
    );
    match connection.send_and_confirm_transaction(&tx).await {
        Ok(sig) => {
            tracing::info!(%sig, "transaction confirmed");
            Ok(sig)
        }
        Err(e) => {
            tracing::warn!(error = %e, "transaction failed");
            Err(e)
        }
    }
}

fn build_signed_transaction(
    instructions: &[Instruction],
    signers: &[&Keypair],
    payer: &solana_sdk::pubkey::Pubkey,
    blockhash: solana_sdk::hash::Hash,
) -> GreeterResult<Transaction> {
    let mut tx = Transaction::new_with_payer(instructions, Some(payer));
    tx.try_sign(signers, blockhash)
        .map_err(|e| GreeterError::submission(format!("signing failed: {e}")))?;

    let wire = bincode::serialize(&tx).map_err(|e| GreeterError::submission(format!("serialize: {e}")))?;
    if wire.len() > PACKET_DATA_SIZE {
        return Err(GreeterError::submission(format!(
            "transaction is {} bytes, limit is {PACKET_DATA_SIZE}",
            wire.len()
        )));
    }
    Ok(tx)
}
