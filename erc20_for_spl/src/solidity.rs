use alloy_sol_types::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    contract IErc20ForSpl {
        /// @notice Moves `amount` to another ledger identity.
        function transfer(address to, uint256 amount) external returns (bool);

        /// @notice Moves `amount` out of `from` against the caller's standing allowance.
        function transferFrom(address from, address to, uint256 amount) external returns (bool);

        /// @notice Sets the caller's allowance for `spender`.
        function approve(address spender, uint256 amount) external returns (bool);

        /// @notice Destroys `amount` of the caller's balance.
        function burn(uint256 amount) external returns (bool);

        /// @notice Destroys `amount` of `from`'s balance against the caller's allowance.
        function burnFrom(address from, uint256 amount) external returns (bool);

        /// @notice Moves `amount` straight to a foreign token account.
        function transferSolana(bytes32 to, uint64 amount) external returns (bool);

        /// @notice `transferSolana` out of `from` against the caller's allowance.
        function transferSolanaFrom(address from, bytes32 to, uint64 amount) external returns (bool);

        /// @notice Delegates `amount` of the caller's bridge-controlled account to a foreign account.
        function approveSolana(bytes32 delegate, uint64 amount) external returns (bool);

        /// @notice Pulls pre-delegated value from `from` into the caller's balance.
        function claim(bytes32 from, uint64 amount) external returns (bool);

        /// @notice Pulls pre-delegated value from `from` into `to`'s balance.
        function claimTo(bytes32 from, address to, uint64 amount) external returns (bool);
    }
}
