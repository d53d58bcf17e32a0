use anyhow::Result;
use ethers_core::types::{
    transaction::eip2718::TypedTransaction, Address, Bytes, NameOrAddress, TransactionRequest, H256, U256,
};
use ethers_core::utils::keccak256;
use ethers_signers::{LocalWallet, Signer};

/// Fee and limit settings for one submission. Gas price is fixed; nothing is estimated.
#[derive(Debug, Clone, Copy)]
pub struct TxParams {
    pub gas_limit: U256,
    pub gas_price: U256,
}

/// A signed, RLP-encoded transaction and its hash.
#[derive(Debug, Clone)]
pub struct SignedTx {
    pub raw: Bytes,
    pub hash: H256,
}

/// Build + sign a legacy (EIP-155) contract call.
pub async fn sign_legacy(
    wallet: &LocalWallet,
    to: Address,
    nonce: U256,
    params: TxParams,
    data: Vec<u8>,
) -> Result<SignedTx> {
    let tx = TransactionRequest {
        from: Some(wallet.address()),
        to: Some(NameOrAddress::Address(to)),
        value: Some(U256::zero()),
        data: Some(data.into()),
        nonce: Some(nonce),
        gas: Some(params.gas_limit),
        gas_price: Some(params.gas_price),
        chain_id: Some(wallet.chain_id().into()),
    };
    let typed = TypedTransaction::Legacy(tx);
    let sig = wallet.sign_transaction(&typed).await?;
    let raw = typed.rlp_signed(&sig);
    let hash = H256::from(keccak256(&raw));
    Ok(SignedTx { raw, hash })
}
