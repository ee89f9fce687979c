use alloy_sol_types::sol;

sol! {
    /// Bridgeable test token deployed on the source chain.
    interface IBridgeToken {
        function bridgeRequest(uint256 _amount) external;
        function mint(address _receiver, uint256 _amount) external;
    }

    /// Holds native collateral on the collateral chain.
    interface ICollateralManager {
        function depositCollateral() external payable;
        function collateralOf(address _user) external view returns (uint256);
    }

    /// Issues and settles loans on the lending chain.
    interface ICrossLoan {
        function repayLoan(uint256 _amount) external;
        function loanOf(address _user) external view returns (uint256);
    }
}
