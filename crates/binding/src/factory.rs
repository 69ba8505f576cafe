//! Data union factory bindings.
//!
//! A data union is deployed through the mainnet factory; the sidechain
//! counterpart is instantiated by a cross-chain message, so the mainnet
//! factory is also the place to resolve one side's address from the other.

use alloy_sol_types::sol;

sol! {
    #[sol(rpc)]
    interface IDataUnionFactoryMainnet {
        /// Deploy a new data union pair. The sidechain contract appears
        /// asynchronously once the bridge delivers the deployment message.
        function deployNewDataUnion(
            address owner,
            uint256 adminFeeFraction,
            address[] memory agents,
            string memory name
        ) external returns (address);

        /// Predicted/actual mainnet contract address for (deployer, name)
        function mainnetAddress(address deployer, string memory name)
            external view returns (address);

        /// Sidechain contract address linked to a mainnet contract
        function sidechainAddress(address mainnetAddress)
            external view returns (address);

        /// Mainnet token the unions pay out in
        function token() external view returns (address);

        /// Mainnet (foreign) bridge endpoint
        function amb() external view returns (address);
    }

    #[sol(rpc)]
    interface IDataUnionFactorySidechain {
        /// Sidechain token earnings accrue in
        function token() external view returns (address);

        /// Sidechain (home) bridge endpoint
        function amb() external view returns (address);

        /// Native currency granted to a newly deployed union
        function setNewDUInitialEth(uint256 amountWei) external;

        /// Native currency granted to a new union's owner
        function setNewDUOwnerInitialEth(uint256 amountWei) external;

        /// Native currency granted to each newly added member
        function setNewMemberInitialEth(uint256 amountWei) external;
    }
}
