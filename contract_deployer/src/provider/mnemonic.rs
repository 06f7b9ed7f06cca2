//!
//! The mnemonic key derivation.
//!

use std::str::FromStr;

use bitcoin::bip32::DerivationPath;
use bitcoin::bip32::Xpriv;
use bitcoin::secp256k1::Secp256k1;
use web3::signing::Key;

///
/// The default Ethereum account derivation path prefix, followed by the account index.
///
pub const DERIVATION_PATH_PREFIX: &str = "m/44'/60'/0'/0";

///
/// Derives the secret key of the account with the specified index.
///
pub fn derive_secret_key(phrase: &str, index: u32) -> anyhow::Result<web3::signing::SecretKey> {
    let mnemonic = bip39::Mnemonic::parse(phrase.trim())
        .map_err(|error| anyhow::anyhow!("invalid mnemonic: {error}"))?;
    let seed = mnemonic.to_seed("");

    let secp = Secp256k1::new();
    let master_key = Xpriv::new_master(bitcoin::Network::Bitcoin, &seed)
        .map_err(|error| anyhow::anyhow!("master key derivation: {error}"))?;
    let path = DerivationPath::from_str(format!("{DERIVATION_PATH_PREFIX}/{index}").as_str())
        .map_err(|error| anyhow::anyhow!("derivation path: {error}"))?;
    let account_key = master_key
        .derive_priv(&secp, &path)
        .map_err(|error| anyhow::anyhow!("account key derivation: {error}"))?;

    web3::signing::SecretKey::from_slice(&account_key.private_key.secret_bytes())
        .map_err(|error| anyhow::anyhow!("secret key: {error}"))
}

///
/// Returns the address of the secret key.
///
pub fn address(secret_key: &web3::signing::SecretKey) -> web3::types::Address {
    web3::signing::SecretKeyRef::new(secret_key).address()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::address;
    use super::derive_secret_key;

    const MNEMONIC: &str = "test test test test test test test test test test test junk";

    #[test]
    fn first_account() {
        let secret_key = derive_secret_key(MNEMONIC, 0).expect("Always valid");

        assert_eq!(
            address(&secret_key),
            web3::types::Address::from_str("f39fd6e51aad88f6f4ce6ab8827279cfffb92266")
                .expect("Always valid")
        );
    }

    #[test]
    fn second_account() {
        let secret_key = derive_secret_key(MNEMONIC, 1).expect("Always valid");

        assert_eq!(
            address(&secret_key),
            web3::types::Address::from_str("70997970c51812dc3a010c7d01b50e0d17dc79c8")
                .expect("Always valid")
        );
    }

    #[test]
    fn error_invalid_phrase() {
        assert!(derive_secret_key("definitely not a seed phrase", 0).is_err());
    }
}
