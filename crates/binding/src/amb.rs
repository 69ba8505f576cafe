//! Arbitrary message bridge (AMB) bindings.
//!
//! The home bridge lives on the sidechain and collects validator signatures
//! over outbound messages; the foreign bridge lives on mainnet and accepts a
//! message once presented with enough of those signatures.

use alloy_sol_types::sol;

sol! {
    /// Sidechain half of the bridge.
    #[sol(rpc)]
    interface IHomeAMB {
        /// Emitted when a sidechain contract asks validators to sign an
        /// outbound message
        event UserRequestForSignature(bytes32 indexed messageId, bytes encodedData);

        /// Validator quorum required before a message may be relayed
        function requiredSignatures() external view returns (uint256);

        /// Signature count for a message hash. Bit 255 is reserved: the
        /// bridge sets it once collection is complete.
        function numMessagesSigned(bytes32 messageHash) external view returns (uint256);

        /// One collected validator signature, 65 bytes r||s||v
        function signature(bytes32 messageHash, uint256 index) external view returns (bytes memory);

        /// The original encoded message payload, by content hash
        function message(bytes32 messageHash) external view returns (bytes memory);
    }

    /// Mainnet half of the bridge.
    #[sol(rpc)]
    interface IForeignAMB {
        /// True if the message id has already been executed here
        function messageCallStatus(bytes32 messageId) external view returns (bool);

        /// Non-zero if the message id was executed and failed
        function failedMessageSender(bytes32 messageId) external view returns (address);

        /// Verify the signature bundle and execute the message
        function executeSignatures(bytes memory message, bytes memory signatures) external;
    }
}
