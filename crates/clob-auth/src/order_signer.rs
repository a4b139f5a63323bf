//! Order assembly and EIP-712 order signatures.

use crate::credentials::Credentials;
use alloy_primitives::Address;
use clob_core::signing::{
    exchange_contract, parse_token_id, random_salt, sign_digest_hex, OrderFields, SignedOrder,
};
use clob_core::types::OrderRequest;
use clob_core::{QuantityResult, Result};
use tracing::debug;

/// Signs orders for one chain.
///
/// The verifying contract is picked per order from `(chain_id, neg_risk)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSigner {
    chain_id: u64,
}

impl OrderSigner {
    /// Fails for chains without exchange contracts.
    pub fn new(chain_id: u64) -> Result<Self> {
        exchange_contract(chain_id, false)?;
        Ok(Self { chain_id })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Assemble the signed struct for a sized request.
    ///
    /// `maker` is the funding address, `signer` the key's own address. The
    /// salt is the client order id when given, otherwise random.
    pub fn build_fields(
        &self,
        credentials: &Credentials,
        request: &OrderRequest,
        amounts: QuantityResult,
    ) -> Result<OrderFields> {
        Ok(OrderFields {
            salt: request.client_order_id.unwrap_or_else(random_salt),
            maker: credentials.funding_address(),
            signer: credentials.address(),
            taker: request.taker.unwrap_or(Address::ZERO),
            token_id: parse_token_id(&request.token_id)?,
            maker_amount: amounts.maker_amount,
            taker_amount: amounts.taker_amount,
            expiration: request.expiration.unwrap_or(0),
            nonce: request.nonce.unwrap_or(0),
            fee_rate_bps: request.fee_rate_bps.unwrap_or(0),
            side: request.side,
            signature_type: credentials.signature_type(),
        })
    }

    /// Sign finished order fields.
    pub fn sign(
        &self,
        credentials: &Credentials,
        fields: &OrderFields,
        neg_risk: bool,
    ) -> Result<SignedOrder> {
        let digest = fields.digest(self.chain_id, neg_risk)?;
        let signature = sign_digest_hex(&digest, credentials.signing_key())?;

        debug!(
            salt = fields.salt,
            chain_id = self.chain_id,
            neg_risk,
            digest = %digest,
            "Order signed"
        );

        Ok(SignedOrder::new(fields, signature))
    }

    /// Build and sign in one step.
    pub fn sign_request(
        &self,
        credentials: &Credentials,
        request: &OrderRequest,
        amounts: QuantityResult,
    ) -> Result<SignedOrder> {
        let fields = self.build_fields(credentials, request, amounts)?;
        self.sign(credentials, &fields, request.neg_risk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use clob_core::signing::{SignatureType, POLYGON_AMOY_CHAIN_ID, POLYGON_CHAIN_ID};
    use clob_core::types::OrderSide;
    use clob_core::Error;
    use rust_decimal::Decimal;

    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn amounts(maker: u64, taker: u64) -> QuantityResult {
        QuantityResult {
            maker_amount: U256::from(maker),
            taker_amount: U256::from(taker),
        }
    }

    #[test]
    fn test_golden_vector_through_request() {
        let signer = OrderSigner::new(POLYGON_AMOY_CHAIN_ID).unwrap();
        let creds = Credentials::new(TEST_PRIVATE_KEY).unwrap();
        let request = OrderRequest::limit("1234", OrderSide::Buy, Decimal::ONE, Decimal::ONE)
            .client_order_id(479249096354)
            .fee_rate_bps(100);

        let signed = signer
            .sign_request(&creds, &request, amounts(100_000_000, 50_000_000))
            .unwrap();

        assert_eq!(signed.salt, 479249096354);
        assert_eq!(signed.maker, "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
        assert_eq!(signed.signer, signed.maker);
        assert_eq!(
            signed.signature,
            "0x302cd9abd0b5fcaa202a344437ec0b6660da984e24ae9ad915a592a90facf5a51bb8a873cd8d270f070217fea1986531d5eec66f1162a81f66e026db653bf7ce1c"
        );
    }

    #[test]
    fn test_funding_address_is_maker() {
        let signer = OrderSigner::new(POLYGON_CHAIN_ID).unwrap();
        let proxy: Address = "0x1111111111111111111111111111111111111111".parse().unwrap();
        let creds = Credentials::new(TEST_PRIVATE_KEY)
            .unwrap()
            .with_funding_address(proxy)
            .with_signature_type(SignatureType::PolyGnosisSafe);
        let request = OrderRequest::limit("42", OrderSide::Sell, Decimal::ONE, Decimal::ONE);

        let fields = signer
            .build_fields(&creds, &request, amounts(1_000_000, 1_000_000))
            .unwrap();

        assert_eq!(fields.maker, proxy);
        assert_eq!(fields.signer, creds.address());
        assert_eq!(fields.taker, Address::ZERO);
        assert_eq!(fields.signature_type, SignatureType::PolyGnosisSafe);
        assert!((1_000_000_000_000..10_000_000_000_000).contains(&fields.salt));
    }

    #[test]
    fn test_neg_risk_changes_signature() {
        let signer = OrderSigner::new(POLYGON_CHAIN_ID).unwrap();
        let creds = Credentials::new(TEST_PRIVATE_KEY).unwrap();
        let request = OrderRequest::limit("42", OrderSide::Buy, Decimal::ONE, Decimal::ONE)
            .client_order_id(1);

        let standard = signer
            .sign_request(&creds, &request, amounts(1, 1))
            .unwrap();
        let neg_risk = signer
            .sign_request(&creds, &request.clone().neg_risk(true), amounts(1, 1))
            .unwrap();
        assert_ne!(standard.signature, neg_risk.signature);
    }

    #[test]
    fn test_unsupported_chain() {
        assert!(matches!(OrderSigner::new(1), Err(Error::Config { .. })));
    }

    #[test]
    fn test_invalid_token_id() {
        let signer = OrderSigner::new(POLYGON_CHAIN_ID).unwrap();
        let creds = Credentials::new(TEST_PRIVATE_KEY).unwrap();
        let request = OrderRequest::limit("not-a-number", OrderSide::Buy, Decimal::ONE, Decimal::ONE);
        assert!(matches!(
            signer.sign_request(&creds, &request, amounts(1, 1)),
            Err(Error::InvalidOrder { .. })
        ));
    }
}
