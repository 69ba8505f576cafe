//! Data union contract bindings.
//!
//! The mainnet contract holds real token value; the sidechain contract does
//! the per-member accounting (earnings, withdrawn counters, membership).

use alloy_sol_types::sol;

sol! {
    #[sol(rpc)]
    interface IDataUnionMainnet {
        /// Flush accumulated revenue through the bridge to the sidechain
        function sendTokensToBridge() external returns (uint256);

        /// Token this union pays out in
        function token() external view returns (address);
    }

    #[sol(rpc)]
    interface IDataUnionSidechain {
        /// Sum of all earnings allocated to members so far
        function totalEarnings() external view returns (uint256);

        /// Sum of all earnings withdrawn so far
        function totalEarningsWithdrawn() external view returns (uint256);

        function activeMemberCount() external view returns (uint256);

        function inactiveMemberCount() external view returns (uint256);

        /// Lifetime earnings per (active) member, the accounting unit
        /// member balances are derived from
        function lifetimeMemberEarnings() external view returns (uint256);

        function joinPartAgentCount() external view returns (uint256);

        function getEarnings(address member) external view returns (uint256);

        /// Cumulative withdrawn counter for a member. Bound into every
        /// signed withdrawal request for replay protection.
        function getWithdrawn(address member) external view returns (uint256);

        function getWithdrawableEarnings(address member) external view returns (uint256);

        /// (status, earningsBeforeLastJoin, lmeAtJoin, withdrawnEarnings);
        /// status: 0 = none, 1 = active, 2 = inactive
        function memberData(address member) external view returns (
            uint8 status,
            uint256 earningsBeforeLastJoin,
            uint256 lmeAtJoin,
            uint256 withdrawnEarnings
        );

        function addJoinPartAgents(address[] memory agents) external;

        function removeJoinPartAgents(address[] memory agents) external;

        function addMembers(address[] memory members) external;

        function partMembers(address[] memory members) external;

        /// Withdraw a member's earnings to their own address.
        /// Caller must be the member or the admin.
        function withdraw(address member, uint256 amount, bool sendToMainnet) external;

        function withdrawAll(address member, bool sendToMainnet) external;

        /// Withdraw the sender's earnings to a chosen recipient
        function withdrawTo(address to, uint256 amount, bool sendToMainnet) external;

        function withdrawAllTo(address to, bool sendToMainnet) external;

        /// Relayed withdrawal: anyone may submit, authorization comes from
        /// the member's signature over (to, amount, contract, withdrawn)
        function withdrawToSigned(
            address from,
            address to,
            uint256 amount,
            bool sendToMainnet,
            bytes memory signature
        ) external;

        function withdrawAllToSigned(
            address from,
            address to,
            bool sendToMainnet,
            bytes memory signature
        ) external;
    }
}
