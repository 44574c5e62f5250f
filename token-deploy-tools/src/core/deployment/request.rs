// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::Constructor,
    primitives::{Address, Bytes, U256},
};

use crate::core::{
    artifact::Artifact,
    supply::{Supply, SupplyError},
};

/// Which contract to instantiate, and with what constructor arguments.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    contract_name: String,
    args: ConstructorArgs,
}

impl DeploymentRequest {
    pub fn new(contract_name: impl Into<String>, args: ConstructorArgs) -> Self {
        Self {
            contract_name: contract_name.into(),
            args,
        }
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    pub fn args(&self) -> &ConstructorArgs {
        &self.args
    }
}

#[derive(Debug, Clone, Default)]
pub enum ConstructorArgs {
    #[default]
    None,
    /// `(string name, string symbol, address initialOwner, uint256 initialSupply)`
    Token(TokenParams),
    /// Strings coerced to the artifact's constructor types.
    Text(Vec<String>),
    Values(Vec<DynSolValue>),
}

#[derive(Debug, Clone)]
pub struct TokenParams {
    pub name: String,
    pub symbol: String,
    /// Defaults to the deployer.
    pub owner: Option<Address>,
    pub supply: Supply,
}

/// Initial supply after scaling to base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreparedSupply {
    pub base_units: U256,
    pub decimals: u8,
}

/// Constructor arguments with every derived value computed.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedArgs {
    values: PreparedValues,
    supply: Option<PreparedSupply>,
}

#[derive(Debug, Clone, PartialEq)]
enum PreparedValues {
    Values(Vec<DynSolValue>),
    Text(Vec<String>),
}

impl ConstructorArgs {
    /// Computes derived arguments. Pure: the same deployer always yields the same arguments.
    pub fn prepare(&self, deployer: Address) -> Result<PreparedArgs, SupplyError> {
        let prepared = match self {
            Self::None => PreparedArgs {
                values: PreparedValues::Values(vec![]),
                supply: None,
            },
            Self::Token(token) => {
                let supply = PreparedSupply {
                    base_units: token.supply.base_units()?,
                    decimals: token.supply.decimals(),
                };
                PreparedArgs {
                    values: PreparedValues::Values(vec![
                        DynSolValue::String(token.name.clone()),
                        DynSolValue::String(token.symbol.clone()),
                        DynSolValue::Address(token.owner.unwrap_or(deployer)),
                        DynSolValue::Uint(supply.base_units, 256),
                    ]),
                    supply: Some(supply),
                }
            }
            Self::Text(args) => PreparedArgs {
                values: PreparedValues::Text(args.clone()),
                supply: None,
            },
            Self::Values(values) => PreparedArgs {
                values: PreparedValues::Values(values.clone()),
                supply: None,
            },
        };
        Ok(prepared)
    }
}

impl PreparedArgs {
    pub fn supply(&self) -> Option<PreparedSupply> {
        self.supply
    }

    fn len(&self) -> usize {
        match &self.values {
            PreparedValues::Values(values) => values.len(),
            PreparedValues::Text(args) => args.len(),
        }
    }

    /// ABI-encodes the arguments for `constructor`.
    pub fn encode(&self, constructor: Option<&Constructor>) -> Result<Vec<u8>, String> {
        let Some(constructor) = constructor else {
            return match self.len() {
                0 => Ok(vec![]),
                n => Err(format!("contract has no constructor, but got {n} arguments")),
            };
        };
        if self.len() != constructor.inputs.len() {
            return Err(format!(
                "mismatch number of constructor arguments (want {:?} ({}); got {})",
                constructor
                    .inputs
                    .iter()
                    .map(|param| param.ty.as_str())
                    .collect::<Vec<_>>(),
                constructor.inputs.len(),
                self.len(),
            ));
        }

        let values = match &self.values {
            PreparedValues::Values(values) => values.clone(),
            PreparedValues::Text(args) => {
                let mut values = Vec::with_capacity(args.len());
                for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
                    let ty = param.resolve().map_err(|err| {
                        format!("could not resolve constructor arg {}: {err}", param.name)
                    })?;
                    let value = ty.coerce_str(arg).map_err(|err| {
                        format!("could not parse constructor arg {} ({}): {err}", param.name, ty)
                    })?;
                    values.push(value);
                }
                values
            }
        };

        constructor
            .abi_encode_input(&values)
            .map_err(|err| err.to_string())
    }

    /// Contract-creation calldata: the artifact's bytecode followed by the encoded arguments.
    pub fn initcode(&self, artifact: &Artifact) -> Result<Bytes, String> {
        let args = self.encode(artifact.constructor())?;
        let mut initcode = Vec::with_capacity(artifact.bytecode.len() + args.len());
        initcode.extend_from_slice(&artifact.bytecode);
        initcode.extend(args);
        Ok(initcode.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy::primitives::address;

    use crate::core::artifact::fixtures;

    const DEPLOYER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn ufv_coin(owner: Option<Address>) -> ConstructorArgs {
        ConstructorArgs::Token(TokenParams {
            name: "UFV Coin".to_string(),
            symbol: "UFV".to_string(),
            owner,
            supply: Supply::new("100000", 18),
        })
    }

    fn word(bytes: &[u8], index: usize) -> &[u8] {
        &bytes[index * 32..(index + 1) * 32]
    }

    #[test]
    fn token_arguments_are_derived_from_deployer() {
        let prepared = ufv_coin(None).prepare(DEPLOYER).unwrap();
        let supply = prepared.supply().unwrap();
        assert_eq!(supply.decimals, 18);
        assert_eq!(
            supply.base_units,
            U256::from(100_000u64) * U256::from(10u64).pow(U256::from(18u64))
        );

        let encoded = prepared.encode(fixtures::unicoin().constructor()).unwrap();
        // four head words, then two (length, data) string tails
        assert_eq!(encoded.len(), 8 * 32);
        assert_eq!(&word(&encoded, 2)[12..], DEPLOYER.as_slice());
        assert_eq!(word(&encoded, 3), &supply.base_units.to_be_bytes::<32>()[..]);
    }

    #[test]
    fn preparation_is_idempotent() {
        let args = ufv_coin(None);
        assert_eq!(args.prepare(DEPLOYER).unwrap(), args.prepare(DEPLOYER).unwrap());
    }

    #[test]
    fn explicit_owner_is_kept() {
        let owner = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let encoded = ufv_coin(Some(owner))
            .prepare(DEPLOYER)
            .unwrap()
            .encode(fixtures::unicoin().constructor())
            .unwrap();
        assert_eq!(&word(&encoded, 2)[12..], owner.as_slice());
    }

    #[test]
    fn text_arguments_are_coerced() {
        let args = ConstructorArgs::Text(vec![
            "UFV Coin".to_string(),
            "UFV".to_string(),
            DEPLOYER.to_string(),
            "100000000000000000000000".to_string(),
        ]);
        let artifact = fixtures::unicoin();
        let from_text = args.prepare(DEPLOYER).unwrap().initcode(&artifact).unwrap();
        let from_token = ufv_coin(None)
            .prepare(DEPLOYER)
            .unwrap()
            .initcode(&artifact)
            .unwrap();
        assert_eq!(from_text, from_token);
        assert!(from_token.starts_with(&artifact.bytecode));
    }

    #[test]
    fn rejects_mismatched_arguments() {
        let constructor = fixtures::unicoin();
        let constructor = constructor.constructor();

        let err = ConstructorArgs::Text(vec!["UFV Coin".to_string()])
            .prepare(DEPLOYER)
            .unwrap()
            .encode(constructor)
            .unwrap_err();
        assert!(err.contains("want"), "{err}");

        let err = ConstructorArgs::Text(vec![
            "UFV Coin".to_string(),
            "UFV".to_string(),
            "not an address".to_string(),
            "1".to_string(),
        ])
        .prepare(DEPLOYER)
        .unwrap()
        .encode(constructor)
        .unwrap_err();
        assert!(err.contains("initialOwner"), "{err}");

        let err = ConstructorArgs::Values(vec![
            DynSolValue::String("UFV Coin".to_string()),
            DynSolValue::String("UFV".to_string()),
            DynSolValue::String("owner".to_string()),
            DynSolValue::Uint(U256::from(1u64), 256),
        ])
        .prepare(DEPLOYER)
        .unwrap()
        .encode(constructor)
        .unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn constructorless_contracts_take_no_arguments() {
        assert_eq!(
            ConstructorArgs::None.prepare(DEPLOYER).unwrap().encode(None),
            Ok(vec![])
        );
        assert!(ConstructorArgs::Text(vec!["1".to_string()])
            .prepare(DEPLOYER)
            .unwrap()
            .encode(None)
            .is_err());
    }
}
