//! Contract bindings for the Functions router, coordinator and consumer.

use alloy::sol;

sol! {
    #[sol(rpc)]
    contract FunctionsRouter {
        struct Subscription {
            uint96 balance;
            address owner;
            uint96 blockedBalance;
            address proposedOwner;
            address[] consumers;
            bytes32 flags;
        }

        function getSubscription(uint64 subscriptionId) external view returns (Subscription memory);

        function getContractById(bytes32 id) external view returns (address);
    }

    #[sol(rpc)]
    contract FunctionsCoordinator {
        function estimateCost(
            uint64 subscriptionId,
            bytes calldata data,
            uint32 callbackGasLimit,
            uint256 gasPriceWei
        ) external view returns (uint96);

        function getDONPublicKey() external view returns (bytes memory);
    }

    #[sol(rpc)]
    contract RecordLabel {
        /// Emitted by the consumer when the router accepts a request.
        event RequestSent(bytes32 indexed id);

        function sendRequest(
            string source,
            uint8 secretsLocation,
            bytes encryptedSecretsReferences,
            string[] args,
            bytes[] bytesArgs,
            uint64 subscriptionId,
            uint32 callbackGasLimit
        ) external;

        function latestResponse() external view returns (bytes memory);

        function latestError() external view returns (bytes memory);
    }
}
