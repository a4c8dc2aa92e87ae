//! Language builtins: global objects, global functions, members of
//! elementary types, keywords.

use crate::hir::DeclarationType;

/// A builtin member or function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Builtin {
    pub name: &'static str,
    /// Type of the member, or return type of the function (`""` for none).
    pub ty: &'static str,
    /// Signature shown in completion details and hover.
    pub detail: &'static str,
    pub doc: &'static str,
}

const fn builtin(name: &'static str, ty: &'static str, detail: &'static str, doc: &'static str) -> Builtin {
    Builtin { name, ty, detail, doc }
}

pub const MSG_MEMBERS: &[Builtin] = &[
    builtin("data", "bytes", "bytes calldata", "Complete calldata."),
    builtin("sender", "address", "address", "Sender of the message (current call)."),
    builtin("sig", "bytes4", "bytes4", "First four bytes of the calldata (function identifier)."),
    builtin("value", "uint256", "uint256", "Number of wei sent with the message."),
];

pub const BLOCK_MEMBERS: &[Builtin] = &[
    builtin("basefee", "uint256", "uint256", "Current block's base fee."),
    builtin("blobbasefee", "uint256", "uint256", "Current block's blob base fee."),
    builtin("chainid", "uint256", "uint256", "Current chain id."),
    builtin("coinbase", "address payable", "address payable", "Current block miner's address."),
    builtin("difficulty", "uint256", "uint256", "Current block difficulty (alias of prevrandao)."),
    builtin("gaslimit", "uint256", "uint256", "Current block gaslimit."),
    builtin("number", "uint256", "uint256", "Current block number."),
    builtin("prevrandao", "uint256", "uint256", "Random number provided by the beacon chain."),
    builtin("timestamp", "uint256", "uint256", "Current block timestamp in seconds since unix epoch."),
];

pub const TX_MEMBERS: &[Builtin] = &[
    builtin("gasprice", "uint256", "uint256", "Gas price of the transaction."),
    builtin("origin", "address", "address", "Sender of the transaction (full call chain)."),
];

pub const ABI_MEMBERS: &[Builtin] = &[
    builtin("decode", "", "abi.decode(bytes memory encodedData, (...)) returns (...)", "ABI-decodes the given data."),
    builtin("encode", "bytes", "abi.encode(...) returns (bytes memory)", "ABI-encodes the given arguments."),
    builtin("encodePacked", "bytes", "abi.encodePacked(...) returns (bytes memory)", "Performs packed encoding of the given arguments."),
    builtin("encodeWithSelector", "bytes", "abi.encodeWithSelector(bytes4 selector, ...) returns (bytes memory)", "ABI-encodes the arguments starting from the second and prepends the selector."),
    builtin("encodeWithSignature", "bytes", "abi.encodeWithSignature(string memory signature, ...) returns (bytes memory)", "Equivalent to encodeWithSelector(bytes4(keccak256(bytes(signature))), ...)."),
    builtin("encodeCall", "bytes", "abi.encodeCall(function functionPointer, (...)) returns (bytes memory)", "ABI-encodes a call to functionPointer with the arguments found in the tuple."),
];

pub const ADDRESS_MEMBERS: &[Builtin] = &[
    builtin("balance", "uint256", "uint256", "Balance of the address in wei."),
    builtin("code", "bytes", "bytes memory", "Code at the address (can be empty)."),
    builtin("codehash", "bytes32", "bytes32", "The codehash of the address."),
    builtin("call", "bool", "call(bytes memory) returns (bool, bytes memory)", "Issue low-level CALL with the given payload."),
    builtin("delegatecall", "bool", "delegatecall(bytes memory) returns (bool, bytes memory)", "Issue low-level DELEGATECALL with the given payload."),
    builtin("staticcall", "bool", "staticcall(bytes memory) returns (bool, bytes memory)", "Issue low-level STATICCALL with the given payload."),
    builtin("send", "bool", "send(uint256 amount) returns (bool)", "Send given amount of wei, returns false on failure."),
    builtin("transfer", "", "transfer(uint256 amount)", "Send given amount of wei, reverts on failure."),
];

pub const ARRAY_MEMBERS: &[Builtin] = &[
    builtin("length", "uint256", "uint256", "Number of elements."),
    builtin("push", "", "push(value)", "Append an element at the end (storage arrays)."),
    builtin("pop", "", "pop()", "Remove the last element (storage arrays)."),
];

pub const GLOBAL_FUNCTIONS: &[Builtin] = &[
    builtin("addmod", "uint256", "addmod(uint256 x, uint256 y, uint256 k) returns (uint256)", "Compute (x + y) % k with arbitrary precision."),
    builtin("assert", "", "assert(bool condition)", "Panic if the condition is not met."),
    builtin("blockhash", "bytes32", "blockhash(uint256 blockNumber) returns (bytes32)", "Hash of the given block, only for the 256 most recent blocks."),
    builtin("blobhash", "bytes32", "blobhash(uint256 index) returns (bytes32)", "Versioned hash of the index-th blob of the transaction."),
    builtin("ecrecover", "address", "ecrecover(bytes32 hash, uint8 v, bytes32 r, bytes32 s) returns (address)", "Recover the signer address from an elliptic curve signature."),
    builtin("gasleft", "uint256", "gasleft() returns (uint256)", "Remaining gas."),
    builtin("keccak256", "bytes32", "keccak256(bytes memory) returns (bytes32)", "Compute the Keccak-256 hash of the input."),
    builtin("mulmod", "uint256", "mulmod(uint256 x, uint256 y, uint256 k) returns (uint256)", "Compute (x * y) % k with arbitrary precision."),
    builtin("require", "", "require(bool condition, string memory message)", "Revert if the condition is not met."),
    builtin("revert", "", "revert(string memory reason)", "Abort execution and revert state changes."),
    builtin("ripemd160", "bytes20", "ripemd160(bytes memory) returns (bytes20)", "Compute the RIPEMD-160 hash of the input."),
    builtin("selfdestruct", "", "selfdestruct(address payable recipient)", "Send all funds to the recipient (deprecated)."),
    builtin("sha256", "bytes32", "sha256(bytes memory) returns (bytes32)", "Compute the SHA-256 hash of the input."),
    builtin("type", "", "type(T)", "Type information: name, creationCode, runtimeCode, interfaceId, min, max."),
];

/// Global objects with members.
pub const GLOBAL_OBJECTS: &[Builtin] = &[
    builtin("abi", "", "abi", "ABI encoding and decoding functions."),
    builtin("block", "", "block", "Properties of the current block."),
    builtin("msg", "", "msg", "Properties of the current call."),
    builtin("tx", "", "tx", "Properties of the current transaction."),
];

pub const KEYWORDS: &[&str] = &[
    "abstract", "anonymous", "assembly", "break", "calldata", "catch", "constant", "constructor",
    "continue", "contract", "delete", "do", "else", "emit", "enum", "error", "event", "external",
    "fallback", "false", "for", "function", "if", "immutable", "import", "indexed", "interface",
    "internal", "is", "library", "mapping", "memory", "modifier", "new", "override", "payable",
    "pragma", "private", "public", "pure", "receive", "return", "returns", "revert", "storage",
    "struct", "super", "this", "true", "try", "type", "unchecked", "using", "view", "virtual",
    "while",
];

pub const ELEMENTARY_TYPES: &[&str] = &[
    "address", "bool", "string", "bytes", "int", "uint", "int8", "int16", "int32", "int64",
    "int128", "int256", "uint8", "uint16", "uint32", "uint64", "uint128", "uint256", "bytes1",
    "bytes2", "bytes4", "bytes8", "bytes16", "bytes20", "bytes32",
];

/// Members of a global object (`msg`, `block`, `tx`, `abi`).
pub fn object_members(object: &str) -> Option<&'static [Builtin]> {
    match object {
        "msg" => Some(MSG_MEMBERS),
        "block" => Some(BLOCK_MEMBERS),
        "tx" => Some(TX_MEMBERS),
        "abi" => Some(ABI_MEMBERS),
        _ => None,
    }
}

/// Builtin members of a value of type `ty`.
pub fn type_members(ty: &DeclarationType) -> &'static [Builtin] {
    if ty.is_array() || (ty.elementary && ty.name == "bytes" && !ty.is_mapping()) {
        return ARRAY_MEMBERS;
    }
    if ty.is_scalar() && ty.elementary && ty.name == "address" {
        return ADDRESS_MEMBERS;
    }
    &[]
}

/// A global object or global function.
pub fn global(name: &str) -> Option<&'static Builtin> {
    GLOBAL_OBJECTS
        .iter()
        .chain(GLOBAL_FUNCTIONS)
        .find(|b| b.name == name)
}
