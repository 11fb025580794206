//! ABI glue for the governor contract: selectors, calldata, and
//! `ProposalCreated` log decoding.

use ethabi::ethereum_types::{H256, U256};
use ethabi::{ParamType, Token};
use tiny_keccak::{Hasher, Keccak};

use crate::types::{Address, ContractCall, ProposalCreated, ProposalId, TxHash};

pub mod signatures {
    pub const PROPOSAL_CREATED_SIG: &str =
        "ProposalCreated(uint256,address,address[],uint256[],string[],bytes[],uint256,uint256,string)";
    pub const PROPOSE_SIG: &str = "propose(address[],uint256[],bytes[],string)";
    pub const CAST_VOTE_SIG: &str = "castVote(uint256[],uint8[])";
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("log has no topics")]
    MissingTopic,
    #[error("unexpected event topic {0}")]
    UnexpectedTopic(String),
    #[error("could not decode {event}: {reason}")]
    Decode { event: &'static str, reason: String },
    #[error("unexpected token for field {0}")]
    UnexpectedToken(&'static str),
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

/// First four bytes of the keccak hash of a function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let h = keccak256(signature.as_bytes());
    [h[0], h[1], h[2], h[3]]
}

/// topic0 of an event.
pub fn event_topic(signature: &str) -> H256 {
    H256(keccak256(signature.as_bytes()))
}

pub fn proposal_created_topic() -> H256 {
    event_topic(signatures::PROPOSAL_CREATED_SIG)
}

/// Full calldata (selector + arguments) for a contract write.
pub fn encode_call(call: &ContractCall) -> Vec<u8> {
    let (sig, args) = match call {
        ContractCall::Propose(p) => (
            signatures::PROPOSE_SIG,
            vec![
                Token::Array(p.targets.iter().map(|a| Token::Address((*a).into())).collect()),
                Token::Array(p.values.iter().map(|v| Token::Uint(*v)).collect()),
                Token::Array(p.calldatas.iter().map(|c| Token::Bytes(c.clone())).collect()),
                Token::String(p.description.clone()),
            ],
        ),
        ContractCall::CastVote(v) => (
            signatures::CAST_VOTE_SIG,
            vec![
                Token::Array(v.proposal_ids.iter().map(|id| Token::Uint(id.0)).collect()),
                Token::Array(
                    v.choices
                        .iter()
                        .map(|c| Token::Uint(U256::from(c.code())))
                        .collect(),
                ),
            ],
        ),
    };
    let mut data = selector(sig).to_vec();
    data.extend(ethabi::encode(&args));
    data
}

/// An undecoded log as returned by `eth_getLogs`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawLog {
    pub topics: Vec<H256>,
    pub data: Vec<u8>,
    pub block_number: Option<u64>,
    pub transaction_hash: Option<TxHash>,
}

/// Decode a `ProposalCreated` log. All of the event's fields are
/// non-indexed, so everything but topic0 lives in `data`.
pub fn decode_proposal_created(log: &RawLog) -> Result<ProposalCreated, AbiError> {
    let topic0 = log.topics.first().ok_or(AbiError::MissingTopic)?;
    if *topic0 != proposal_created_topic() {
        return Err(AbiError::UnexpectedTopic(format!("{:?}", topic0)));
    }

    let tokens = ethabi::decode(
        &[
            ParamType::Uint(256),
            ParamType::Address,
            ParamType::Array(Box::new(ParamType::Address)),
            ParamType::Array(Box::new(ParamType::Uint(256))),
            ParamType::Array(Box::new(ParamType::String)),
            ParamType::Array(Box::new(ParamType::Bytes)),
            ParamType::Uint(256),
            ParamType::Uint(256),
            ParamType::String,
        ],
        &log.data,
    )
    .map_err(|e| AbiError::Decode {
        event: "ProposalCreated",
        reason: e.to_string(),
    })?;

    let [id, proposer, targets, values, sigs, calldatas, vote_start, vote_end, description]: [Token; 9] =
        tokens.try_into().map_err(|_| AbiError::Decode {
            event: "ProposalCreated",
            reason: "wrong number of fields".into(),
        })?;

    Ok(ProposalCreated {
        proposal_id: ProposalId(uint(id, "proposalId")?),
        proposer: address(proposer, "proposer")?,
        targets: array(targets, "targets")?
            .into_iter()
            .map(|t| address(t, "targets"))
            .collect::<Result<_, _>>()?,
        values: array(values, "values")?
            .into_iter()
            .map(|t| uint(t, "values"))
            .collect::<Result<_, _>>()?,
        signatures: array(sigs, "signatures")?
            .into_iter()
            .map(|t| string(t, "signatures"))
            .collect::<Result<_, _>>()?,
        calldatas: array(calldatas, "calldatas")?
            .into_iter()
            .map(|t| bytes(t, "calldatas"))
            .collect::<Result<_, _>>()?,
        vote_start: uint(vote_start, "voteStart")?,
        vote_end: uint(vote_end, "voteEnd")?,
        description: string(description, "description")?,
        block_number: log.block_number,
        transaction_hash: log.transaction_hash,
    })
}

fn uint(t: Token, field: &'static str) -> Result<U256, AbiError> {
    match t {
        Token::Uint(u) => Ok(u),
        _ => Err(AbiError::UnexpectedToken(field)),
    }
}

fn address(t: Token, field: &'static str) -> Result<Address, AbiError> {
    match t {
        Token::Address(a) => Ok(a.into()),
        _ => Err(AbiError::UnexpectedToken(field)),
    }
}

fn array(t: Token, field: &'static str) -> Result<Vec<Token>, AbiError> {
    match t {
        Token::Array(v) => Ok(v),
        _ => Err(AbiError::UnexpectedToken(field)),
    }
}

fn string(t: Token, field: &'static str) -> Result<String, AbiError> {
    match t {
        Token::String(s) => Ok(s),
        _ => Err(AbiError::UnexpectedToken(field)),
    }
}

fn bytes(t: Token, field: &'static str) -> Result<Vec<u8>, AbiError> {
    match t {
        Token::Bytes(b) => Ok(b),
        _ => Err(AbiError::UnexpectedToken(field)),
    }
}
